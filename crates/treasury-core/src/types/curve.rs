//! Canonically ordered yield curves.

use std::ops::Deref;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Term, YieldPoint};

/// A yield curve: either the designated empty curve or a non-empty,
/// canonically ordered set of points.
///
/// There is no way to build a partially ordered or duplicated curve: the only
/// constructor for [`CurvePoints`] is [`canonicalize`].
///
/// Serializes as a plain JSON array of points (`[]` for the empty curve).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Curve {
    /// No curve was produced.
    #[default]
    Empty,
    /// A curve with at least one point.
    NonEmpty(CurvePoints),
}

/// Non-empty points with pairwise-distinct terms in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurvePoints(Vec<YieldPoint>);

impl CurvePoints {
    /// Returns the points as a slice.
    pub fn as_slice(&self) -> &[YieldPoint] {
        &self.0
    }

    /// Consumes the points into a vector.
    pub fn into_vec(self) -> Vec<YieldPoint> {
        self.0
    }
}

impl Deref for CurvePoints {
    type Target = [YieldPoint];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Curve {
    /// Returns `true` for the empty curve.
    pub fn is_empty(&self) -> bool {
        matches!(self, Curve::Empty)
    }

    /// Number of points on the curve.
    pub fn len(&self) -> usize {
        self.points().len()
    }

    /// Points in canonical order (empty slice for the empty curve).
    pub fn points(&self) -> &[YieldPoint] {
        match self {
            Curve::Empty => &[],
            Curve::NonEmpty(points) => points.as_slice(),
        }
    }

    /// Consumes the curve into its points.
    pub fn into_points(self) -> Vec<YieldPoint> {
        match self {
            Curve::Empty => Vec::new(),
            Curve::NonEmpty(points) => points.into_vec(),
        }
    }

    /// Rate for a term, if the curve carries it.
    pub fn rate_for(&self, term: Term) -> Option<Decimal> {
        self.points()
            .iter()
            .find(|p| p.term == term)
            .map(|p| p.rate)
    }

    /// Rate for a term label, matched case-insensitively (`"10y"` finds `10Y`).
    pub fn rate_for_label(&self, label: &str) -> Option<Decimal> {
        label.parse::<Term>().ok().and_then(|term| self.rate_for(term))
    }
}

/// Builds a canonical curve from points in any order.
///
/// Duplicates are dropped (the first point seen for a term wins) and the
/// remaining points are emitted in canonical term order. No input yields
/// [`Curve::Empty`].
pub fn canonicalize(points: impl IntoIterator<Item = YieldPoint>) -> Curve {
    let mut slots: [Option<YieldPoint>; Term::COUNT] = [None; Term::COUNT];

    for point in points {
        let slot = &mut slots[point.term.ordinal()];
        if slot.is_none() {
            *slot = Some(point);
        }
    }

    let ordered: Vec<YieldPoint> = slots.into_iter().flatten().collect();
    if ordered.is_empty() {
        Curve::Empty
    } else {
        Curve::NonEmpty(CurvePoints(ordered))
    }
}

impl From<Vec<YieldPoint>> for Curve {
    fn from(points: Vec<YieldPoint>) -> Self {
        canonicalize(points)
    }
}

impl Serialize for Curve {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.points().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Curve {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<YieldPoint>::deserialize(deserializer).map(canonicalize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn terms(curve: &Curve) -> Vec<Term> {
        curve.points().iter().map(|p| p.term).collect()
    }

    #[test]
    fn test_empty_input() {
        let curve = canonicalize(Vec::new());
        assert!(curve.is_empty());
        assert_eq!(curve.len(), 0);
        assert!(curve.points().is_empty());
    }

    #[test]
    fn test_reorders_to_canonical() {
        let curve = canonicalize(vec![
            YieldPoint::new(Term::Y30, dec!(4.60)),
            YieldPoint::new(Term::M1_5, dec!(5.30)),
            YieldPoint::new(Term::Y2, dec!(4.75)),
            YieldPoint::new(Term::M1, dec!(5.25)),
        ]);
        assert_eq!(terms(&curve), [Term::M1, Term::M1_5, Term::Y2, Term::Y30]);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let curve = canonicalize(vec![
            YieldPoint::new(Term::Y10, dec!(4.10)),
            YieldPoint::new(Term::Y10, dec!(9.99)),
        ]);
        assert_eq!(curve.len(), 1);
        assert_eq!(curve.rate_for(Term::Y10), Some(dec!(4.10)));
    }

    #[test]
    fn test_idempotent() {
        let once = canonicalize(vec![
            YieldPoint::new(Term::Y5, dec!(4.20)),
            YieldPoint::new(Term::M3, dec!(5.40)),
        ]);
        let twice = canonicalize(once.clone().into_points());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rate_for_label_case_insensitive() {
        let curve = canonicalize(vec![YieldPoint::new(Term::Y10, dec!(4.10))]);
        assert_eq!(curve.rate_for_label("10y"), Some(dec!(4.10)));
        assert_eq!(curve.rate_for_label("10Y"), Some(dec!(4.10)));
        assert_eq!(curve.rate_for_label("2Y"), None);
        assert_eq!(curve.rate_for_label("bogus"), None);
    }

    #[test]
    fn test_serializes_as_array() {
        assert_eq!(serde_json::to_string(&Curve::Empty).unwrap(), "[]");

        let curve = canonicalize(vec![
            YieldPoint::new(Term::Y2, dec!(4.75)),
            YieldPoint::new(Term::M1, dec!(4.25)),
        ]);
        let json = serde_json::to_value(&curve).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "term": "1M", "rate": 4.25 },
                { "term": "2Y", "rate": 4.75 }
            ])
        );

        let back: Curve = serde_json::from_value(json).unwrap();
        assert_eq!(back, curve);
    }
}
