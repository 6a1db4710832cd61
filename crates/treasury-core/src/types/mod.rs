//! Domain types for the yield curve service.
//!
//! - [`Date`]: Calendar date used for cutoffs and feed observations
//! - [`YearMonth`]: Reporting month of the Treasury feed
//! - [`Term`]: Canonical curve maturity and its feed field key
//! - [`YieldPoint`]: One (term, rate) observation
//! - [`Curve`]: Canonically ordered curve, or the empty curve

mod curve;
mod date;
mod term;
mod yield_point;

pub use curve::{canonicalize, Curve, CurvePoints};
pub use date::{Date, YearMonth};
pub use term::Term;
pub use yield_point::YieldPoint;
