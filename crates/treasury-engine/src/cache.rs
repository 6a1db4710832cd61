//! Single-slot curve cache with lazy staleness.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use treasury_core::{Curve, CurvePoints};
use treasury_traits::config::CacheConfig;

/// A stored curve and the instant it was fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    points: CurvePoints,
    fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// The cached curve. Never empty.
    pub fn curve(&self) -> Curve {
        Curve::NonEmpty(self.points.clone())
    }

    /// Cached points.
    pub fn points(&self) -> &CurvePoints {
        &self.points
    }

    /// When the curve was fetched.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Age at `now`. A `now` earlier than the fetch counts as zero age.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.fetched_at).to_std().unwrap_or(Duration::ZERO)
    }

    /// Whether the entry is younger than `ttl` at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) < ttl
    }
}

/// Curve cache holding at most one entry.
///
/// Readers clone the `Arc` under a read lock, so a reader sees either the
/// previous entry or the new one, never a mix. Stores overwrite; nothing is
/// ever evicted.
#[derive(Debug)]
pub struct CurveCache {
    slot: RwLock<Option<Arc<CacheEntry>>>,
    ttl: Duration,
}

impl CurveCache {
    /// Create an empty cache.
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    /// Create an empty cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.ttl())
    }

    /// Freshness window.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current entry, fresh or not.
    pub fn read(&self) -> Option<Arc<CacheEntry>> {
        self.slot.read().clone()
    }

    /// Current entry if it is still fresh at `now`.
    pub fn read_fresh(&self, now: DateTime<Utc>) -> Option<Arc<CacheEntry>> {
        self.read().filter(|entry| entry.is_fresh(now, self.ttl))
    }

    /// Replace the entry.
    pub fn store(&self, points: CurvePoints, fetched_at: DateTime<Utc>) -> Arc<CacheEntry> {
        let entry = Arc::new(CacheEntry { points, fetched_at });
        *self.slot.write() = Some(Arc::clone(&entry));
        entry
    }
}

impl Default for CurveCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use treasury_core::{Term, YieldPoint};

    fn points() -> CurvePoints {
        match Curve::from(vec![YieldPoint::new(Term::Y2, dec!(4.75))]) {
            Curve::NonEmpty(points) => points,
            Curve::Empty => unreachable!(),
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_cache_reads_none() {
        let cache = CurveCache::default();
        assert_eq!(cache.ttl(), Duration::from_secs(1800));
        assert!(cache.read().is_none());
        assert!(cache.read_fresh(t0()).is_none());
    }

    #[test]
    fn test_fresh_until_ttl() {
        let cache = CurveCache::new(Duration::from_secs(1800));
        cache.store(points(), t0());

        let just_before = t0() + chrono::Duration::seconds(1799);
        let at_ttl = t0() + chrono::Duration::minutes(30);

        assert!(cache.read_fresh(t0()).is_some());
        assert!(cache.read_fresh(just_before).is_some());
        assert!(cache.read_fresh(at_ttl).is_none());
        // stale entries stay readable
        assert!(cache.read().is_some());
    }

    #[test]
    fn test_store_overwrites() {
        let cache = CurveCache::default();
        cache.store(points(), t0());
        let later = t0() + chrono::Duration::hours(1);
        let entry = cache.store(points(), later);

        assert_eq!(entry.fetched_at(), later);
        assert_eq!(cache.read().unwrap().fetched_at(), later);
        assert_eq!(entry.curve().rate_for(Term::Y2), Some(dec!(4.75)));
    }

    #[test]
    fn test_clock_behind_fetch_is_fresh() {
        let cache = CurveCache::default();
        let entry = cache.store(points(), t0());
        let earlier = t0() - chrono::Duration::minutes(5);
        assert_eq!(entry.age(earlier), Duration::ZERO);
        assert!(cache.read_fresh(earlier).is_some());
    }
}
