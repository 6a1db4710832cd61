//! Yield query service.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use treasury_core::{Curve, Date, YearMonth};
use treasury_traits::clock::Clock;
use treasury_traits::config::FallbackCutoff;
use treasury_traits::feed::FeedSource;

use crate::cache::CurveCache;
use crate::error::EngineError;
use crate::extractor::CurveExtractor;

/// Serves the current yield curve from cache or feed.
///
/// Every query returns a curve. Feed failures, unparseable documents and
/// months without data all end in [`Curve::Empty`] after the previous month
/// has been tried.
///
/// Concurrent callers with a stale cache each run the fetch pipeline; the
/// last store wins.
pub struct YieldService {
    feed: Arc<dyn FeedSource>,
    clock: Arc<dyn Clock>,
    cache: Arc<CurveCache>,
    extractor: Arc<dyn CurveExtractor>,
    fallback_cutoff: FallbackCutoff,
}

impl YieldService {
    pub(crate) fn new(
        feed: Arc<dyn FeedSource>,
        clock: Arc<dyn Clock>,
        cache: Arc<CurveCache>,
        extractor: Arc<dyn CurveExtractor>,
        fallback_cutoff: FallbackCutoff,
    ) -> Self {
        Self {
            feed,
            clock,
            cache,
            extractor,
            fallback_cutoff,
        }
    }

    /// The current curve.
    ///
    /// A fresh cache entry is returned without touching the feed. Otherwise
    /// the current month is fetched, then the previous month if the first
    /// attempt produced nothing. A non-empty result replaces the cache entry;
    /// an empty one leaves it alone.
    pub async fn current_curve(&self) -> Curve {
        let now = self.clock.now();
        if let Some(entry) = self.cache.read_fresh(now) {
            debug!(age_secs = entry.age(now).as_secs(), "curve cache hit");
            return entry.curve();
        }

        let today = self.clock.today();
        match self.refresh(today).await {
            Ok(Curve::NonEmpty(points)) => {
                let entry = self.cache.store(points, self.clock.now());
                info!(%today, points = entry.points().len(), "yield curve refreshed");
                entry.curve()
            }
            Ok(Curve::Empty) => {
                warn!(%today, "no yield curve data for current or previous month");
                Curve::Empty
            }
            Err(e) => {
                error!(%today, error = %e, "yield curve refresh failed");
                Curve::Empty
            }
        }
    }

    /// Fetch and extract the curve as of `today`, bypassing the cache.
    ///
    /// Tries the month of `today` with `today` as cutoff, then the previous
    /// month with the fallback cutoff.
    pub async fn refresh(&self, today: Date) -> Result<Curve, EngineError> {
        let month = today.year_month();
        let current = self.curve_for_month(month, today).await;
        if !current.is_empty() {
            return Ok(current);
        }

        let cutoff = self.fallback_cutoff_for(today)?;
        debug!(%month, %cutoff, "falling back to previous month");
        Ok(self.curve_for_month(month.previous(), cutoff).await)
    }

    /// Cutoff applied to the previous month's document.
    pub fn fallback_cutoff_for(&self, today: Date) -> Result<Date, EngineError> {
        match self.fallback_cutoff {
            FallbackCutoff::ShiftedMonth => Ok(today.add_months(-1)?),
            FallbackCutoff::Today => Ok(today),
        }
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<CurveCache> {
        &self.cache
    }

    /// Configured fallback cutoff policy.
    pub fn fallback_cutoff(&self) -> FallbackCutoff {
        self.fallback_cutoff
    }

    async fn curve_for_month(&self, month: YearMonth, cutoff: Date) -> Curve {
        match self.feed.fetch_month(month).await {
            Ok(document) => {
                let curve = self.extractor.extract(&document, cutoff);
                debug!(
                    feed = self.feed.name(),
                    %month,
                    %cutoff,
                    bytes = document.len(),
                    points = curve.len(),
                    "extracted feed document"
                );
                curve
            }
            Err(e) => {
                warn!(feed = self.feed.name(), %month, error = %e, "feed fetch failed");
                Curve::Empty
            }
        }
    }
}

impl std::fmt::Debug for YieldService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YieldService")
            .field("feed", &self.feed.name())
            .field("ttl", &self.cache.ttl())
            .field("fallback_cutoff", &self.fallback_cutoff)
            .finish()
    }
}
