//! Time-indexed binary encoding of a job shop.
//!
//! Pipeline (each stage computed once, immutable afterwards):
//!
//! 1. [`TimeWindows`]: admissible start times per operation
//! 2. [`VariableSpace`]: one binary variable per `(job, operation, time)`
//! 3. Constraint passes:
//!    - [`start_once_groups`]: exactly one start per operation
//!    - [`capacity_pairs`]: no two operations overlap on a machine
//!    - [`precedence_pairs`]: operations of a job run in order
//!
//! The resulting [`Encoding`] is handed to a
//! [`ModelEmitter`](crate::emit::ModelEmitter), which renders it for a
//! specific solver.
//!
//! # Reference
//! Venturelli et al. (2015), "Quantum Annealing Implementation of Job-Shop
//! Scheduling", arXiv:1506.08479

mod capacity;
mod precedence;
mod start_once;
mod variables;
mod windows;

pub use capacity::{capacity_pairs, capacity_pairs_for, machine_pairs};
pub use precedence::precedence_pairs;
pub use start_once::{one_hot_configurations, start_once_groups, OneHotTables};
pub use variables::{MachineGroup, OpRef, VariableSpace};
pub use windows::TimeWindows;

use std::time::Instant;

use tracing::info;

use crate::config::EncoderConfig;
use crate::emit::ModelEmitter;
use crate::error::{EncodingError, Result};
use crate::models::{
    Assignment, ExclusionPair, JobShop, StartOnceGroup, VarKey, Violation, ViolationKind,
};
use crate::validation::{horizon_overflow, validate_job_shop};

/// Builds [`Encoding`]s from job shops.
///
/// # Example
/// ```
/// use u_jsp_csp::{EncoderConfig, JspEncoder};
/// use u_jsp_csp::models::JobShop;
///
/// let shop = JobShop::from_pairs([
///     ("j1", vec![("m1", 2), ("m2", 1)]),
///     ("j2", vec![("m2", 1), ("m1", 1)]),
/// ]);
/// let encoding = JspEncoder::new(EncoderConfig::default().with_horizon(4))
///     .encode(&shop)
///     .unwrap();
/// assert_eq!(encoding.start_once().len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JspEncoder {
    config: EncoderConfig,
}

impl JspEncoder {
    /// Creates an encoder.
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Validates `shop` and builds its encoding.
    ///
    /// # Errors
    /// - [`EncodingError::InvalidJobSpec`] if validation fails
    /// - [`EncodingError::InfeasibleHorizon`] if an operation has no start time
    /// - [`EncodingError::VariableSpaceTooLarge`] if the variables cannot be
    ///   allocated
    ///
    /// Without an explicit horizon, the sum of all durations is used, and
    /// never less than 1.
    pub fn encode(&self, shop: &JobShop) -> Result<Encoding> {
        validate_job_shop(shop, self.config.horizon).map_err(EncodingError::InvalidJobSpec)?;

        let started = Instant::now();
        let horizon = match self.config.horizon {
            Some(h) => h,
            None => shop
                .total_duration()
                .ok_or_else(|| EncodingError::InvalidJobSpec(vec![horizon_overflow()]))?
                .max(1),
        };

        info!(
            event = "encode_start",
            jobs = shop.job_count(),
            operations = shop.operation_count(),
            horizon = horizon,
            eliminate_slack = self.config.eliminate_slack,
        );

        let windows = TimeWindows::compute(shop, horizon, self.config.eliminate_slack)?;
        let variables = VariableSpace::build(shop, windows)?;
        let start_once = start_once_groups(&variables);
        let capacity = capacity_pairs(&variables, self.config.parallel);
        let precedence = precedence_pairs(&variables);

        info!(
            event = "encode_end",
            variables = variables.len(),
            start_once = start_once.len(),
            capacity = capacity.len(),
            precedence = precedence.len(),
            duration_ms = started.elapsed().as_millis() as u64,
        );

        Ok(Encoding {
            horizon,
            variables,
            start_once,
            capacity,
            precedence,
        })
    }
}

/// Variables and constraints of an encoded job shop.
#[derive(Debug, Clone)]
pub struct Encoding {
    horizon: i64,
    variables: VariableSpace,
    start_once: Vec<StartOnceGroup>,
    capacity: Vec<ExclusionPair>,
    precedence: Vec<ExclusionPair>,
}

impl Encoding {
    /// Encodes `shop` with `config`. Shorthand for [`JspEncoder::encode`].
    pub fn new(shop: &JobShop, config: EncoderConfig) -> Result<Self> {
        JspEncoder::new(config).encode(shop)
    }

    /// Horizon actually used.
    pub fn horizon(&self) -> i64 {
        self.horizon
    }

    /// The variable space.
    pub fn variables(&self) -> &VariableSpace {
        &self.variables
    }

    /// Start-once groups, one per operation.
    pub fn start_once(&self) -> &[StartOnceGroup] {
        &self.start_once
    }

    /// Machine-capacity exclusion pairs.
    pub fn capacity(&self) -> &[ExclusionPair] {
        &self.capacity
    }

    /// Precedence exclusion pairs.
    pub fn precedence(&self) -> &[ExclusionPair] {
        &self.precedence
    }

    /// All exclusion pairs, capacity first.
    pub fn exclusions(&self) -> impl Iterator<Item = &ExclusionPair> + '_ {
        self.capacity.iter().chain(&self.precedence)
    }

    /// Total number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.start_once.len() + self.capacity.len() + self.precedence.len()
    }

    /// Feeds every variable and constraint to `emitter`.
    ///
    /// Order: variables, start-once groups, capacity pairs, precedence pairs.
    pub fn emit<E: ModelEmitter>(&self, emitter: &mut E) {
        for &key in self.variables.keys() {
            emitter.emit_variable(key);
        }
        for group in &self.start_once {
            emitter.emit_start_once(group);
        }
        for pair in self.exclusions() {
            emitter.emit_exclusion(pair);
        }
    }

    /// Builds an assignment from `(job ID, 0-based op, start time)` triples.
    ///
    /// Returns `None` if any triple is not an admissible variable.
    pub fn assignment_from_starts<'a, I>(&self, starts: I) -> Option<Assignment>
    where
        I: IntoIterator<Item = (&'a str, usize, i64)>,
    {
        starts
            .into_iter()
            .map(|(job, op, time)| self.variables.key_for(job, op, time))
            .collect()
    }

    /// Lists every constraint broken by `assignment`.
    ///
    /// Keys outside the variable space are ignored.
    pub fn check(&self, assignment: &Assignment) -> Vec<Violation> {
        let mut violations = Vec::new();

        for group in &self.start_once {
            let set = group.vars.iter().filter(|&&k| assignment.value(k)).count();
            if set != 1 {
                violations.push(Violation::new(
                    ViolationKind::StartOnce,
                    group.vars.clone(),
                    format!(
                        "{} operation {} starts {} times",
                        self.job_label(group.job),
                        group.operation,
                        set
                    ),
                ));
            }
        }

        for pair in self.exclusions() {
            let (a, b) = (assignment.value(pair.first), assignment.value(pair.second));
            if !ExclusionPair::is_satisfied(a, b) {
                violations.push(Violation::new(
                    ViolationKind::from(pair.origin),
                    vec![pair.first, pair.second],
                    format!(
                        "{} and {} are both set",
                        self.variables.label(pair.first),
                        self.variables.label(pair.second)
                    ),
                ));
            }
        }

        violations
    }

    /// Whether `assignment` satisfies every constraint.
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.check(assignment).is_empty()
    }

    /// Whether `key` is one of this encoding's variables.
    pub fn contains(&self, key: VarKey) -> bool {
        self.variables.contains(key)
    }

    fn job_label(&self, job: u32) -> String {
        let id = self.variables.job_id(job as usize).unwrap_or("?");
        format!("job '{id}'")
    }
}
