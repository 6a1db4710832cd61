//! # Treasury Ext File
//!
//! File-based and in-memory implementations for the Treasury yield curve
//! service.
//!
//! This crate provides default implementations for offline runs and tests:
//! - Directory-backed feed source (`<dir>/<YYYYMM>.xml`)
//! - Scripted in-memory feed source with request accounting
//! - Manually driven clock
//! - In-memory order store
//!
//! For live data, use `treasury-ext-http`.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod clock;
mod feed;
mod orders;

pub use clock::*;
pub use feed::*;
pub use orders::*;
