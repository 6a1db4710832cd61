//! File-based and in-memory feed sources.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;

use treasury_core::YearMonth;
use treasury_traits::error::FeedError;
use treasury_traits::feed::FeedSource;

// =============================================================================
// FILE FEED SOURCE
// =============================================================================

/// Feed source reading one saved document per month from a directory.
///
/// The document for January 2024 is expected at `<dir>/202401.xml`.
pub struct FileFeedSource {
    dir: PathBuf,
}

impl FileFeedSource {
    /// Create a new file feed source rooted at `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the document for a month.
    pub fn month_path(&self, month: YearMonth) -> PathBuf {
        self.dir.join(format!("{month}.xml"))
    }
}

#[async_trait]
impl FeedSource for FileFeedSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_month(&self, month: YearMonth) -> Result<String, FeedError> {
        let path = self.month_path(month);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(FeedError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// IN-MEMORY FEED SOURCE
// =============================================================================

/// Scripted feed source for tests.
///
/// Each month answers with a configured document or failure; unscripted
/// months answer `NotFound`. Every request is recorded.
#[derive(Default)]
pub struct InMemoryFeedSource {
    responses: DashMap<YearMonth, Result<String, FeedError>>,
    requests: Mutex<Vec<YearMonth>>,
    latency: Option<Duration>,
}

impl InMemoryFeedSource {
    /// Create a source with no scripted months.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` for `month`.
    pub fn with_document(self, month: YearMonth, document: impl Into<String>) -> Self {
        self.set_document(month, document);
        self
    }

    /// Fail requests for `month` with `error`.
    pub fn with_failure(self, month: YearMonth, error: FeedError) -> Self {
        self.set_failure(month, error);
        self
    }

    /// Delay every response, to widen race windows in concurrency tests.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Replace the response for `month` with a document.
    pub fn set_document(&self, month: YearMonth, document: impl Into<String>) {
        self.responses.insert(month, Ok(document.into()));
    }

    /// Replace the response for `month` with a failure.
    pub fn set_failure(&self, month: YearMonth, error: FeedError) {
        self.responses.insert(month, Err(error));
    }

    /// Months requested so far, in request order.
    pub fn requests(&self) -> Vec<YearMonth> {
        self.requests.lock().clone()
    }

    /// Number of requests served so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl FeedSource for InMemoryFeedSource {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn fetch_month(&self, month: YearMonth) -> Result<String, FeedError> {
        self.requests.lock().push(month);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.responses
            .get(&month)
            .map(|r| r.value().clone())
            .unwrap_or_else(|| Err(FeedError::NotFound(month.to_string())))
    }
}

// =============================================================================
// EMPTY FEED SOURCE
// =============================================================================

/// Feed source with no documents at all.
pub struct EmptyFeedSource;

#[async_trait]
impl FeedSource for EmptyFeedSource {
    fn name(&self) -> &str {
        "empty"
    }

    async fn fetch_month(&self, month: YearMonth) -> Result<String, FeedError> {
        Err(FeedError::NotFound(month.to_string()))
    }
}
