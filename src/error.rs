//! Error types for job-shop encoding.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while building an [`Encoding`](crate::encoding::Encoding).
///
/// Every error is reported before any variable or constraint is generated,
/// so a failed build never leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    /// The job description failed input validation.
    #[error("invalid job spec: {}", join_messages(.0))]
    InvalidJobSpec(Vec<ValidationError>),

    /// An operation has no admissible start time within the horizon.
    #[error("horizon {horizon} leaves no start time for job '{job}' operation {operation}")]
    InfeasibleHorizon {
        job: String,
        /// 1-based operation number.
        operation: usize,
        horizon: i64,
    },

    /// The windows admit more variables than can be allocated.
    #[error("horizon {horizon} requires {variables} variables, more than can be allocated")]
    VariableSpaceTooLarge {
        /// Requested variable count, saturated at `usize::MAX`.
        variables: usize,
        horizon: i64,
    },

    /// A machine lookup failed (internal invariant violation).
    #[error("unknown machine '{0}'")]
    UnknownMachine(String),
}

/// Result alias for encoding operations.
pub type Result<T> = std::result::Result<T, EncodingError>;

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
