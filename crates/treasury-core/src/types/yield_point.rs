//! Single (term, rate) observation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Term;

/// A par yield for one maturity, in percent.
///
/// Serializes as `{"term": "2Y", "rate": 4.75}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YieldPoint {
    /// Maturity
    pub term: Term,
    /// Rate in percent
    pub rate: Decimal,
}

impl YieldPoint {
    /// Creates a new yield point.
    pub fn new(term: Term, rate: Decimal) -> Self {
        Self { term, rate }
    }
}
