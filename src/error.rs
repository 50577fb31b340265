//! Error types for fitcalc

use thiserror::Error;

use crate::types::Field;

/// A raw input value that cannot be turned into a validated field.
///
/// Always recoverable: the interactive session re-prompts on any of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is not a number: {raw:?}")]
    NotANumber { field: Field, raw: String },

    #[error("{field} is not an integer: {raw:?}")]
    NotAnInteger { field: Field, raw: String },

    #[error("{field} must be positive, got {raw:?}")]
    NotPositive { field: Field, raw: String },

    #[error("Unknown gender: {0:?}")]
    UnknownGender(String),

    #[error("Unknown activity level: {0:?}")]
    UnknownActivity(String),
}

impl ValidationError {
    /// Field the rejected value was entered for
    pub fn field(&self) -> Field {
        match self {
            ValidationError::NotANumber { field, .. }
            | ValidationError::NotAnInteger { field, .. }
            | ValidationError::NotPositive { field, .. } => *field,
            ValidationError::UnknownGender(_) => Field::Gender,
            ValidationError::UnknownActivity(_) => Field::Activity,
        }
    }
}

/// Errors that end an input session before a record is complete
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Input cancelled by user")]
    Cancelled,

    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input record: {0}")]
    Invalid(#[from] ValidationError),
}

/// Errors raised while encoding a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Encoding error: {0}")]
    Json(#[from] serde_json::Error),
}
