//! Variable assignments and constraint violations.
//!
//! An assignment fixes every decision variable to 0 or 1. Only the
//! variables set to 1 are stored; everything else reads as 0.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{ExclusionOrigin, VarKey};

/// A 0/1 assignment over decision variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    ones: BTreeSet<VarKey>,
}

/// A constraint broken by an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Constraint family.
    pub kind: ViolationKind,
    /// Variables of the violated constraint.
    pub vars: Vec<VarKey>,
    /// Human-readable description.
    pub message: String,
}

/// Classification of violated constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    /// A start-once group has zero or several variables set.
    StartOnce,
    /// Two operations occupy the same machine at once.
    MachineCapacity,
    /// A successor starts before its predecessor finishes.
    Precedence,
}

impl From<ExclusionOrigin> for ViolationKind {
    fn from(origin: ExclusionOrigin) -> Self {
        match origin {
            ExclusionOrigin::MachineCapacity => ViolationKind::MachineCapacity,
            ExclusionOrigin::Precedence => ViolationKind::Precedence,
        }
    }
}

impl Violation {
    /// Creates a violation.
    pub fn new(kind: ViolationKind, vars: Vec<VarKey>, message: impl Into<String>) -> Self {
        Self {
            kind,
            vars,
            message: message.into(),
        }
    }
}

impl Assignment {
    /// Creates an all-zero assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable to 1.
    pub fn set(&mut self, key: VarKey) {
        self.ones.insert(key);
    }

    /// Sets a variable to 0.
    pub fn clear(&mut self, key: VarKey) {
        self.ones.remove(&key);
    }

    /// Value of a variable.
    #[inline]
    pub fn value(&self, key: VarKey) -> bool {
        self.ones.contains(&key)
    }

    /// Variables set to 1, in key order.
    pub fn ones(&self) -> impl Iterator<Item = VarKey> + '_ {
        self.ones.iter().copied()
    }

    /// Number of variables set to 1.
    pub fn count_ones(&self) -> usize {
        self.ones.len()
    }
}

impl FromIterator<VarKey> for Assignment {
    fn from_iter<I: IntoIterator<Item = VarKey>>(iter: I) -> Self {
        Self {
            ones: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let k = VarKey::new(0, 1, 3);
        let mut a = Assignment::new();
        assert!(!a.value(k));
        a.set(k);
        assert!(a.value(k));
        assert_eq!(a.count_ones(), 1);
        a.clear(k);
        assert!(!a.value(k));
    }

    #[test]
    fn test_collect() {
        let a: Assignment = [VarKey::new(1, 1, 1), VarKey::new(0, 2, 4)]
            .into_iter()
            .collect();
        assert_eq!(
            a.ones().collect::<Vec<_>>(),
            vec![VarKey::new(0, 2, 4), VarKey::new(1, 1, 1)]
        );
    }

    #[test]
    fn test_violation_kind_from_origin() {
        assert_eq!(
            ViolationKind::from(ExclusionOrigin::Precedence),
            ViolationKind::Precedence
        );
        assert_eq!(
            ViolationKind::from(ExclusionOrigin::MachineCapacity),
            ViolationKind::MachineCapacity
        );
    }
}
