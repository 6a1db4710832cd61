//! # Treasury Engine
//!
//! Curve extraction, caching and query orchestration for the Treasury
//! yield curve service.
//!
//! This crate provides:
//! - [`XmlCurveExtractor`]: Picks the latest qualifying entry from a feed document
//! - [`CurveCache`]: Single-slot cache with a freshness window
//! - [`YieldService`]: Cache-first query with a previous-month fallback
//! - [`YieldServiceBuilder`]: Wires feed, clock, cache and extractor
//!
//! ## Architecture
//!
//! ```text
//! current_curve ─┬─> CurveCache (fresh) ──────────────────────────> Curve
//!                │
//!                └─> FeedSource(month) ─> XmlCurveExtractor ─┬─> Curve ─> CurveCache
//!                                                            │
//!                    FeedSource(month - 1) <─── empty ───────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let service = YieldServiceBuilder::new()
//!     .with_feed(Arc::new(TreasuryHttpFeed::new(&FeedConfig::default())?))
//!     .with_cache_config(CacheConfig::default())
//!     .build()?;
//!
//! let curve = service.current_curve().await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod cache;
pub mod error;
pub mod extractor;
pub mod service;

// Re-exports
pub use builder::YieldServiceBuilder;
pub use cache::{CacheEntry, CurveCache};
pub use error::{EngineError, ExtractError};
pub use extractor::{extract_curve, select_entry, CurveExtractor, RawEntry, XmlCurveExtractor};
pub use service::YieldService;
