//! Builder pattern for the yield service.

use std::sync::Arc;

use treasury_traits::clock::{Clock, SystemClock};
use treasury_traits::config::{CacheConfig, FallbackCutoff};
use treasury_traits::feed::FeedSource;

use crate::cache::CurveCache;
use crate::error::EngineError;
use crate::extractor::{CurveExtractor, XmlCurveExtractor};
use crate::service::YieldService;

/// Builder for constructing a [`YieldService`].
///
/// Only the feed is required. The clock defaults to the system clock, the
/// cache to a thirty minute window and the extractor to the XML extractor.
pub struct YieldServiceBuilder {
    feed: Option<Arc<dyn FeedSource>>,
    clock: Option<Arc<dyn Clock>>,
    cache: Option<Arc<CurveCache>>,
    cache_config: CacheConfig,
    extractor: Option<Arc<dyn CurveExtractor>>,
    fallback_cutoff: FallbackCutoff,
}

impl YieldServiceBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            feed: None,
            clock: None,
            cache: None,
            cache_config: CacheConfig::default(),
            extractor: None,
            fallback_cutoff: FallbackCutoff::default(),
        }
    }

    /// Set the feed source.
    pub fn with_feed(mut self, feed: Arc<dyn FeedSource>) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Set the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the cache configuration. Ignored if a cache is supplied.
    pub fn with_cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }

    /// Share an existing cache.
    pub fn with_cache(mut self, cache: Arc<CurveCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set the curve extractor.
    pub fn with_extractor(mut self, extractor: Arc<dyn CurveExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Set the fallback cutoff policy.
    pub fn with_fallback_cutoff(mut self, cutoff: FallbackCutoff) -> Self {
        self.fallback_cutoff = cutoff;
        self
    }

    /// Build the yield service.
    pub fn build(self) -> Result<YieldService, EngineError> {
        let feed = self
            .feed
            .ok_or_else(|| EngineError::ConfigError("feed not configured".into()))?;

        if self.cache.is_none() && self.cache_config.ttl_secs == 0 {
            return Err(EngineError::ConfigError(
                "cache ttl_secs must be positive".into(),
            ));
        }

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(CurveCache::from_config(&self.cache_config)));
        let extractor = self
            .extractor
            .unwrap_or_else(|| Arc::new(XmlCurveExtractor));

        Ok(YieldService::new(
            feed,
            clock,
            cache,
            extractor,
            self.fallback_cutoff,
        ))
    }
}

impl Default for YieldServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
