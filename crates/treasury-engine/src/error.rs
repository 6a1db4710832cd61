//! Engine error types.

use thiserror::Error;

use treasury_core::{CoreError, Date};

/// Engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Date arithmetic failed
    #[error("date error: {0}")]
    DateError(#[from] CoreError),
}

/// Why a feed document produced no curve.
///
/// Only ever logged: extraction degrades to the empty curve.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The document is not well-formed XML
    #[error("XML parsing error: {0}")]
    Parse(#[from] quick_xml::Error),

    /// No entry is dated on or before the cutoff with at least one numeric field
    #[error("no qualifying entry on or before {cutoff} ({entries} entries seen)")]
    NoQualifyingData {
        /// Entries found in the document
        entries: usize,
        /// Cutoff that was applied
        cutoff: Date,
    },
}
