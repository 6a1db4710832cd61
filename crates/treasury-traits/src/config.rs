//! Shared configuration.
//!
//! Configuration contains:
//! - Feed endpoint, identity and timeouts
//! - Cache freshness window
//! - Cutoff policy for the previous-month fallback
//!
//! Every field has a default, so a partial TOML table is always valid.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Treasury daily interest rate XML endpoint.
pub const DEFAULT_FEED_URL: &str =
    "https://home.treasury.gov/resource-center/data-chart-center/interest-rates/pages/xml";

/// Default identifying user agent.
pub const DEFAULT_USER_AGENT: &str = "TreasuryLiquidity/1.0 (+http://localhost)";

// =============================================================================
// FEED CONFIG
// =============================================================================

/// Feed client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Endpoint, without query string
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Overall response timeout in seconds
    #[serde(default = "default_response_timeout_secs")]
    pub response_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_response_timeout_secs() -> u64 {
    10
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            connect_timeout_secs: default_connect_timeout_secs(),
            response_timeout_secs: default_response_timeout_secs(),
        }
    }
}

impl FeedConfig {
    /// Config pointing at a different endpoint (tests, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Overall response timeout.
    pub fn response_timeout(&self) -> Duration {
        Duration::from_secs(self.response_timeout_secs)
    }
}

// =============================================================================
// CACHE CONFIG
// =============================================================================

/// Curve cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entries at least this old are stale
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    30 * 60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl CacheConfig {
    /// Freshness window.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

// =============================================================================
// FALLBACK CUTOFF
// =============================================================================

/// Cutoff used when retrying against the previous reporting month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackCutoff {
    /// Today with the month decremented, clamped to month end
    /// (2024-03-31 becomes 2024-02-29).
    #[default]
    ShiftedMonth,

    /// Today, unchanged.
    Today,
}
