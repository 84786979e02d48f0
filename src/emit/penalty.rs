//! Quadratic penalty rendering.
//!
//! Constraints become penalty terms over binary variables:
//!
//! | Constraint | Penalty |
//! |------------|---------|
//! | Start-once over `x_1..x_n` | `w·(Σx_i − 1)² = w·(1 − Σx_i + 2·Σ_{i<j} x_i·x_j)` |
//! | Exclusion `(a, b)` | `w·x_a·x_b` |
//!
//! With positive weights, the energy is zero exactly on assignments that
//! satisfy every constraint. Minimising the energy is left to the solver.
//!
//! # Reference
//! Lucas (2014), "Ising formulations of many NP problems"

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Assignment, ExclusionOrigin, ExclusionPair, StartOnceGroup, VarKey};

use super::ModelEmitter;

/// Penalty weight per constraint family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyWeights {
    /// Weight of start-once terms.
    pub start_once: f64,
    /// Weight of machine-capacity terms.
    pub capacity: f64,
    /// Weight of precedence terms.
    pub precedence: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            start_once: 1.0,
            capacity: 1.0,
            precedence: 1.0,
        }
    }
}

impl PenaltyWeights {
    fn exclusion(&self, origin: ExclusionOrigin) -> f64 {
        match origin {
            ExclusionOrigin::MachineCapacity => self.capacity,
            ExclusionOrigin::Precedence => self.precedence,
        }
    }
}

/// Linear and quadratic penalty coefficients plus a constant offset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PenaltyModel {
    /// Linear coefficient per variable.
    pub linear: BTreeMap<VarKey, f64>,
    /// Quadratic coefficient per variable pair (first < second).
    pub quadratic: BTreeMap<(VarKey, VarKey), f64>,
    /// Constant term.
    pub offset: f64,
}

impl PenaltyModel {
    /// Evaluates the penalty of `assignment`.
    pub fn energy(&self, assignment: &Assignment) -> f64 {
        let linear: f64 = self
            .linear
            .iter()
            .filter(|(&k, _)| assignment.value(k))
            .map(|(_, c)| c)
            .sum();
        let quadratic: f64 = self
            .quadratic
            .iter()
            .filter(|(&(a, b), _)| assignment.value(a) && assignment.value(b))
            .map(|(_, c)| c)
            .sum();
        self.offset + linear + quadratic
    }

    /// Number of variables with a linear entry.
    pub fn variable_count(&self) -> usize {
        self.linear.len()
    }

    fn add_linear(&mut self, key: VarKey, coeff: f64) {
        *self.linear.entry(key).or_insert(0.0) += coeff;
    }

    fn add_quadratic(&mut self, a: VarKey, b: VarKey, coeff: f64) {
        let pair = if a <= b { (a, b) } else { (b, a) };
        *self.quadratic.entry(pair).or_insert(0.0) += coeff;
    }
}

/// Emitter producing a [`PenaltyModel`].
#[derive(Debug, Clone, Default)]
pub struct PenaltyEmitter {
    weights: PenaltyWeights,
    model: PenaltyModel,
}

impl PenaltyEmitter {
    /// Creates an emitter with unit weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an emitter with custom weights.
    pub fn with_weights(weights: PenaltyWeights) -> Self {
        Self {
            weights,
            model: PenaltyModel::default(),
        }
    }

    /// Returns the finished model.
    pub fn finish(self) -> PenaltyModel {
        self.model
    }
}

impl ModelEmitter for PenaltyEmitter {
    fn emit_variable(&mut self, key: VarKey) {
        self.model.add_linear(key, 0.0);
    }

    fn emit_start_once(&mut self, group: &StartOnceGroup) {
        let w = self.weights.start_once;
        self.model.offset += w;
        for (i, &a) in group.vars.iter().enumerate() {
            self.model.add_linear(a, -w);
            for &b in &group.vars[i + 1..] {
                self.model.add_quadratic(a, b, 2.0 * w);
            }
        }
    }

    fn emit_exclusion(&mut self, pair: &ExclusionPair) {
        let w = self.weights.exclusion(pair.origin);
        self.model.add_quadratic(pair.first, pair.second, w);
    }
}
