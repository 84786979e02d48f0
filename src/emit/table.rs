//! Allowed-configuration tables.
//!
//! Every constraint is rendered as the explicit list of value tuples its
//! variables may take. Start-once groups share one one-hot table per
//! distinct length; all exclusion pairs share the `{00, 01, 10}` table.

use std::sync::Arc;

use crate::encoding::OneHotTables;
use crate::models::{Assignment, ExclusionOrigin, ExclusionPair, StartOnceGroup, VarKey};

use super::ModelEmitter;

/// A constraint given by its allowed configurations.
#[derive(Debug, Clone)]
pub struct TableConstraint {
    /// Constrained variables.
    pub vars: Vec<VarKey>,
    /// Allowed value tuples, one entry per variable.
    pub allowed: Arc<Vec<Vec<bool>>>,
    /// Exclusion family, `None` for start-once groups.
    pub origin: Option<ExclusionOrigin>,
}

impl TableConstraint {
    /// Whether the values of `vars` under `assignment` form an allowed row.
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.allows(&self.values(assignment))
    }

    /// Whether `values` is an allowed row.
    pub fn allows(&self, values: &[bool]) -> bool {
        self.allowed.iter().any(|row| row.as_slice() == values)
    }

    fn values(&self, assignment: &Assignment) -> Vec<bool> {
        self.vars.iter().map(|&k| assignment.value(k)).collect()
    }
}

/// A model of table constraints over binary variables.
#[derive(Debug, Clone, Default)]
pub struct TableModel {
    /// Declared variables in emission order.
    pub variables: Vec<VarKey>,
    /// Constraints in emission order.
    pub constraints: Vec<TableConstraint>,
}

impl TableModel {
    /// Whether every constraint accepts `assignment`.
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied(assignment))
    }

    /// Indices of constraints rejecting `assignment`.
    pub fn violated_constraints(&self, assignment: &Assignment) -> Vec<usize> {
        self.constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_satisfied(assignment))
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of distinct table allocations referenced by constraints.
    pub fn distinct_tables(&self) -> usize {
        let mut seen: Vec<*const Vec<Vec<bool>>> = self
            .constraints
            .iter()
            .map(|c| Arc::as_ptr(&c.allowed))
            .collect();
        seen.sort();
        seen.dedup();
        seen.len()
    }
}

/// Emitter producing a [`TableModel`].
#[derive(Debug, Clone)]
pub struct TableEmitter {
    model: TableModel,
    one_hot: OneHotTables,
    exclusion: Arc<Vec<Vec<bool>>>,
}

impl Default for TableEmitter {
    fn default() -> Self {
        Self {
            model: TableModel::default(),
            one_hot: OneHotTables::new(),
            exclusion: Arc::new(vec![
                vec![false, false],
                vec![false, true],
                vec![true, false],
            ]),
        }
    }
}

impl TableEmitter {
    /// Creates an empty emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the finished model.
    pub fn finish(self) -> TableModel {
        self.model
    }
}

impl ModelEmitter for TableEmitter {
    fn emit_variable(&mut self, key: VarKey) {
        self.model.variables.push(key);
    }

    fn emit_start_once(&mut self, group: &StartOnceGroup) {
        let allowed = self.one_hot.get(group.len());
        self.model.constraints.push(TableConstraint {
            vars: group.vars.clone(),
            allowed,
            origin: None,
        });
    }

    fn emit_exclusion(&mut self, pair: &ExclusionPair) {
        self.model.constraints.push(TableConstraint {
            vars: vec![pair.first, pair.second],
            allowed: Arc::clone(&self.exclusion),
            origin: Some(pair.origin),
        });
    }
}
