//! Clock abstraction.

use chrono::{DateTime, Utc};

use treasury_core::Date;

/// Source of "now" and "today".
///
/// Cache freshness is measured against [`Clock::now`]; cutoff dates are
/// derived from [`Clock::today`].
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date.
    fn today(&self) -> Date;
}

/// Wall clock. `today` follows the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> Date {
        Date::today()
    }
}
