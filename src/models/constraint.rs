//! Generated constraint types.
//!
//! The encoding produces two constraint shapes over binary variables:
//! - **Start-once groups**: exactly one member is 1.
//! - **Exclusion pairs**: the two members are never both 1. Machine capacity
//!   and job precedence both reduce to this shape.
//!
//! # Reference
//! Venturelli et al. (2015), "Quantum Annealing Implementation of Job-Shop
//! Scheduling", arXiv:1506.08479

use serde::{Deserialize, Serialize};

use super::VarKey;

/// Why an exclusion pair exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExclusionOrigin {
    /// Two operations would occupy the same machine at once.
    MachineCapacity,
    /// A successor would start before its predecessor finishes.
    Precedence,
}

/// An unordered pair of variables that must not both be 1.
///
/// Members are stored in ascending key order, so `(a, b)` and `(b, a)`
/// build equal pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExclusionPair {
    /// Smaller key.
    pub first: VarKey,
    /// Larger key.
    pub second: VarKey,
    /// Constraint family that produced the pair.
    pub origin: ExclusionOrigin,
}

impl ExclusionPair {
    /// Creates a pair, normalising member order.
    pub fn new(a: VarKey, b: VarKey, origin: ExclusionOrigin) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first,
            second,
            origin,
        }
    }

    /// Shorthand for a machine-capacity pair.
    pub fn capacity(a: VarKey, b: VarKey) -> Self {
        Self::new(a, b, ExclusionOrigin::MachineCapacity)
    }

    /// Shorthand for a precedence pair.
    pub fn precedence(a: VarKey, b: VarKey) -> Self {
        Self::new(a, b, ExclusionOrigin::Precedence)
    }

    /// Evaluates the pair for the given member values.
    #[inline]
    pub fn is_satisfied(first: bool, second: bool) -> bool {
        !(first && second)
    }
}

/// All variables of one `(job, operation)`; exactly one must be 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartOnceGroup {
    /// Job index.
    pub job: u32,
    /// Operation number (1-based).
    pub operation: u32,
    /// Member variables in ascending time order.
    pub vars: Vec<VarKey>,
}

impl StartOnceGroup {
    /// Number of member variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Evaluates the sum-equals-one predicate over member values.
    pub fn is_satisfied(values: &[bool]) -> bool {
        values.iter().filter(|&&v| v).count() == 1
    }
}
