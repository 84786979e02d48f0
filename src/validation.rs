//! Input validation for job-shop instances.
//!
//! Checks structural integrity of the job description before any window,
//! variable, or constraint is generated. Detects:
//! - Duplicate job IDs
//! - Jobs without operations
//! - Negative operation durations
//! - Duration sums that overflow `i64`
//! - Non-positive explicit horizons
//!
//! All problems are collected, not just the first one.

use crate::models::JobShop;
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two jobs share the same ID.
    DuplicateJobId,
    /// A job has no operations.
    EmptyJob,
    /// An operation has a negative duration.
    NegativeDuration,
    /// A duration sum does not fit in `i64`.
    DurationOverflow,
    /// The explicit horizon is zero or negative.
    NonPositiveHorizon,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// A job whose operations cannot be summed.
pub(crate) fn job_duration_overflow(job_id: &str) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::DurationOverflow,
        format!("Job '{job_id}' total duration overflows"),
    )
}

/// A shop whose default horizon cannot be summed.
pub(crate) fn horizon_overflow() -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::DurationOverflow,
        "Default horizon (sum of all durations) overflows",
    )
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a job-shop instance and an optional explicit horizon.
///
/// Checks:
/// 1. No duplicate job IDs
/// 2. Every job has at least one operation
/// 3. Every duration is non-negative
/// 4. Every job's total duration, and the default horizon when no horizon
///    is given, fit in `i64`
/// 5. The horizon, when given, is positive
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_job_shop(shop: &JobShop, horizon: Option<i64>) -> ValidationResult {
    let mut errors = Vec::new();

    let mut job_ids = HashSet::new();
    let mut job_sums_fit = true;
    for job in &shop.jobs {
        if !job_ids.insert(job.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateJobId,
                format!("Duplicate job ID: {}", job.id),
            ));
        }

        if job.operations.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyJob,
                format!("Job '{}' has no operations", job.id),
            ));
        }

        for (idx, op) in job.operations.iter().enumerate() {
            if op.duration < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeDuration,
                    format!(
                        "Job '{}' operation {} has negative duration {}",
                        job.id,
                        idx + 1,
                        op.duration
                    ),
                ));
            }
        }

        if job.total_duration().is_none() {
            job_sums_fit = false;
            errors.push(job_duration_overflow(&job.id));
        }
    }

    match horizon {
        Some(h) if h <= 0 => errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveHorizon,
            format!("Horizon must be positive, got {h}"),
        )),
        None if job_sums_fit && shop.total_duration().is_none() => {
            errors.push(horizon_overflow());
        }
        _ => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
