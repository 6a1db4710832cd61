//! # Treasury Traits
//!
//! Trait definitions for the Treasury yield curve service.
//!
//! This crate contains the seams between the query engine and the outside
//! world. Implementations live in the extension crates.
//!
//! ## Module Structure
//!
//! - [`feed`]: The raw feed document source ([`FeedSource`])
//! - [`clock`]: Wall clock abstraction ([`Clock`])
//! - [`config`]: Feed, cache and fallback configuration
//! - [`error`]: Transport failure taxonomy ([`FeedError`])
//!
//! ## Dependency Injection
//!
//! The yield service uses these traits via dependency injection:
//!
//! ```ignore
//! YieldServiceBuilder::new()
//!     .with_feed(impl FeedSource)
//!     .with_clock(impl Clock)
//!     .with_cache_config(CacheConfig::default())
//!     .build()
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod config;
pub mod error;
pub mod feed;

// Re-export commonly used types
pub use clock::{Clock, SystemClock};
pub use config::{CacheConfig, FallbackCutoff, FeedConfig};
pub use error::FeedError;
pub use feed::FeedSource;
