//! Decision variable keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compact key of a binary decision variable `x[job, operation, time]`.
///
/// The variable is 1 iff operation `operation` of job `job` starts at
/// `time`. Keys order by job index, then operation, then time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VarKey {
    /// Job index (position in [`JobShop::jobs`](crate::models::JobShop)).
    pub job: u32,
    /// Operation number within the job (1-based).
    pub operation: u32,
    /// Start time (1-based).
    pub time: i64,
}

impl VarKey {
    /// Creates a key.
    #[inline]
    pub fn new(job: u32, operation: u32, time: i64) -> Self {
        Self {
            job,
            operation,
            time,
        }
    }

    /// Renders the conventional `x_{job}_o{op}_t{time}` label.
    pub fn label(&self, job_id: &str) -> String {
        format!("x_{}_o{}_t{}", job_id, self.operation, self.time)
    }
}

impl fmt::Display for VarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x[{},{},{}]", self.job, self.operation, self.time)
    }
}
