//! Error types for the core value types.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for core value construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid or out-of-range calendar date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Term label outside the canonical term set.
    #[error("Unknown term: {label}")]
    UnknownTerm {
        /// The label that failed to parse.
        label: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an unknown term error.
    #[must_use]
    pub fn unknown_term(label: impl Into<String>) -> Self {
        Self::UnknownTerm {
            label: label.into(),
        }
    }
}
