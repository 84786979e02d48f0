//! Job and operation models.
//!
//! A job is an ordered chain of operations. Each operation runs on one
//! machine for a fixed integer duration, and the operations of a job must
//! execute in the order given.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 2

use serde::{Deserialize, Serialize};

/// A job-shop instance: the set of jobs to encode.
///
/// Jobs keep their insertion order, which fixes the job index used in
/// variable keys. Duplicate job IDs are representable here and rejected by
/// [`validate_job_shop`](crate::validation::validate_job_shop).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobShop {
    /// Jobs in index order.
    pub jobs: Vec<Job>,
}

impl JobShop {
    /// Creates an empty instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a job.
    pub fn with_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    /// Builds an instance from `(job, [(machine, duration)])` pairs.
    ///
    /// # Example
    /// ```
    /// use u_jsp_csp::models::JobShop;
    ///
    /// let shop = JobShop::from_pairs([
    ///     ("j1", vec![("m1", 2), ("m2", 1)]),
    ///     ("j2", vec![("m2", 3)]),
    /// ]);
    /// assert_eq!(shop.job_count(), 2);
    /// assert_eq!(shop.total_duration(), Some(6));
    /// ```
    pub fn from_pairs<J, M, I>(pairs: I) -> Self
    where
        J: Into<String>,
        M: Into<String>,
        I: IntoIterator<Item = (J, Vec<(M, i64)>)>,
    {
        let jobs = pairs
            .into_iter()
            .map(|(id, ops)| {
                ops.into_iter()
                    .fold(Job::new(id), |job, (machine, duration)| {
                        job.with_operation(Operation::new(machine, duration))
                    })
            })
            .collect();
        Self { jobs }
    }

    /// Number of jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Number of operations across all jobs.
    pub fn operation_count(&self) -> usize {
        self.jobs.iter().map(|j| j.operations.len()).sum()
    }

    /// Sum of every operation duration. Used as the default horizon.
    ///
    /// `None` if the sum overflows `i64`.
    pub fn total_duration(&self) -> Option<i64> {
        self.jobs
            .iter()
            .try_fold(0i64, |acc, job| acc.checked_add(job.total_duration()?))
    }

    /// Distinct machine IDs in first-seen order.
    pub fn machines(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for op in self.jobs.iter().flat_map(|j| &j.operations) {
            if !seen.contains(&op.machine.as_str()) {
                seen.push(op.machine.as_str());
            }
        }
        seen
    }

    /// Looks up a job by ID.
    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }
}

/// A job: an ordered sequence of operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: String,
    /// Operations in processing order.
    pub operations: Vec<Operation>,
}

impl Job {
    /// Creates a job with no operations.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            operations: Vec::new(),
        }
    }

    /// Appends an operation.
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Total processing duration of the job, `None` on overflow.
    pub fn total_duration(&self) -> Option<i64> {
        self.operations
            .iter()
            .try_fold(0i64, |acc, op| acc.checked_add(op.duration))
    }

    /// Number of operations.
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }
}

/// A single processing step on one machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Machine that processes this operation.
    pub machine: String,
    /// Processing duration in time slots. Must be non-negative.
    pub duration: i64,
}

impl Operation {
    /// Creates an operation.
    pub fn new(machine: impl Into<String>, duration: i64) -> Self {
        Self {
            machine: machine.into(),
            duration,
        }
    }
}
