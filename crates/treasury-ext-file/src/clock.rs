//! Manually driven clock.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use parking_lot::RwLock;

use treasury_core::Date;
use treasury_traits::clock::Clock;

/// Clock that only moves when told to.
///
/// `today` is the UTC date of `now`, so advancing past midnight also moves
/// the calendar date.
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    /// Clock fixed at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Clock fixed at noon UTC on `date`.
    pub fn at(date: Date) -> Self {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
        Self::new(date.as_naive_date().and_time(noon).and_utc())
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.now.write() += by;
    }

    /// Jump to an instant.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }

    fn today(&self) -> Date {
        Date::from(self.now.read().date_naive())
    }
}
