//! Solver-specific renderings of an encoding.
//!
//! The generation core produces variables, start-once groups, and exclusion
//! pairs. A [`ModelEmitter`] turns those into whatever a downstream solver
//! consumes, without re-running generation:
//!
//! - [`TableEmitter`]: explicit allowed-configuration tables, as used by
//!   binary CSP front ends.
//! - [`PenaltyEmitter`]: quadratic penalty terms over binary variables
//!   (QUBO form), zero exactly on feasible assignments.
//!
//! Emitters only read the encoding; they never modify it.

mod penalty;
mod table;

pub use penalty::{PenaltyEmitter, PenaltyModel, PenaltyWeights};
pub use table::{TableConstraint, TableEmitter, TableModel};

use crate::models::{ExclusionPair, StartOnceGroup, VarKey};

/// Receiver of an encoding's variables and constraints.
///
/// Driven by [`Encoding::emit`](crate::encoding::Encoding::emit).
pub trait ModelEmitter {
    /// Declares a binary variable. Default: ignored.
    fn emit_variable(&mut self, _key: VarKey) {}

    /// Exactly one member of `group` must be 1.
    fn emit_start_once(&mut self, group: &StartOnceGroup);

    /// The two members of `pair` must not both be 1.
    fn emit_exclusion(&mut self, pair: &ExclusionPair);
}
