//! # Treasury Core
//!
//! Core types for the Treasury yield curve service.
//!
//! This crate provides the value types shared by every other crate in the
//! workspace:
//!
//! - **Dates**: [`Date`] and [`YearMonth`] for cutoffs and reporting months
//! - **Terms**: the fixed set of curve maturities and their feed field keys
//! - **Curves**: [`YieldPoint`] and the canonically ordered [`Curve`]
//!
//! ## Example
//!
//! ```rust
//! use treasury_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let curve = canonicalize(vec![
//!     YieldPoint::new(Term::Y10, dec!(4.10)),
//!     YieldPoint::new(Term::M1, dec!(5.25)),
//! ]);
//!
//! let terms: Vec<&str> = curve.points().iter().map(|p| p.term.label()).collect();
//! assert_eq!(terms, ["1M", "10Y"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{canonicalize, Curve, CurvePoints, Date, Term, YearMonth, YieldPoint};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{canonicalize, Curve, CurvePoints, Date, Term, YearMonth, YieldPoint};
