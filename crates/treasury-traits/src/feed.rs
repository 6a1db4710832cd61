//! Feed source trait.

use async_trait::async_trait;

use crate::error::FeedError;
use treasury_core::YearMonth;

/// Source of raw daily yield curve documents, one per reporting month.
///
/// A source issues at most one request per call and never retries; retry and
/// fallback policy belongs to the caller.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Fetch the raw document for a reporting month.
    async fn fetch_month(&self, month: YearMonth) -> Result<String, FeedError>;
}
