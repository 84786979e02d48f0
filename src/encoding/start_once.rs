//! Start-once constraints.
//!
//! Each operation starts exactly once: among the variables of one
//! `(job, operation)` exactly one is 1. Solvers that enumerate allowed
//! configurations instead of evaluating predicates need the explicit list
//! of one-hot patterns; only distinct window sizes need distinct tables.

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::StartOnceGroup;

use super::VariableSpace;

/// Builds one start-once group per operation, in job-then-operation order.
pub fn start_once_groups(space: &VariableSpace) -> Vec<StartOnceGroup> {
    space
        .groups()
        .map(|(job, op, vars)| StartOnceGroup {
            job: job as u32,
            operation: op as u32 + 1,
            vars: vars.to_vec(),
        })
        .collect()
}

/// All one-hot bit patterns of length `n`.
///
/// Pattern `i` has only bit `i` set, so there are exactly `n` patterns.
pub fn one_hot_configurations(n: usize) -> Vec<Vec<bool>> {
    (0..n)
        .map(|hot| (0..n).map(|bit| bit == hot).collect())
        .collect()
}

/// Memoised one-hot tables keyed by group length.
#[derive(Debug, Clone, Default)]
pub struct OneHotTables {
    tables: HashMap<usize, Arc<Vec<Vec<bool>>>>,
}

impl OneHotTables {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table for groups of length `n`, built on first use.
    pub fn get(&mut self, n: usize) -> Arc<Vec<Vec<bool>>> {
        Arc::clone(
            self.tables
                .entry(n)
                .or_insert_with(|| Arc::new(one_hot_configurations(n))),
        )
    }

    /// Number of distinct lengths built so far.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no table has been built.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
