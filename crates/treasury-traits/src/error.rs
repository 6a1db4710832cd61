//! Error types for feed retrieval.

use thiserror::Error;

/// Failure to retrieve a raw feed document.
///
/// None of these reach API callers: the yield service treats every variant as
/// "no curve for this period" and moves on to its fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The endpoint answered with a 4xx or 5xx status
    #[error("feed returned HTTP status {0}")]
    Status(u16),

    /// Connect or response timeout elapsed
    #[error("timeout")]
    Timeout,

    /// Connection or protocol failure
    #[error("network error: {0}")]
    Network(String),

    /// No document exists for the requested month
    #[error("not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for FeedError {
    fn from(e: std::io::Error) -> Self {
        FeedError::Io(e.to_string())
    }
}
