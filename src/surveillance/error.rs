//! Surveillance error types
//!
//! Errors raised while generating the synthetic dataset or interpreting
//! filter input against the fixed catalogs.

use thiserror::Error;

/// Errors that can occur in the surveillance and pipeline layers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurveillanceError {
    /// A size, window or range argument is out of bounds
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A category name does not belong to its closed catalog
    #[error("Unknown {kind}: {value}")]
    UnknownCategory { kind: &'static str, value: String },

    /// A date string could not be parsed
    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

impl SurveillanceError {
    pub(crate) fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        SurveillanceError::UnknownCategory {
            kind,
            value: value.into(),
        }
    }
}

/// Result type alias for surveillance operations
pub type SurveillanceResult<T> = Result<T, SurveillanceError>;
