//! Canonical curve maturities.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A maturity on the Treasury par yield curve.
///
/// Variants are declared shortest to longest maturity, so the derived
/// ordering is the canonical term order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    /// 1 month
    M1,
    /// 1.5 months (6 weeks)
    M1_5,
    /// 2 months
    M2,
    /// 3 months
    M3,
    /// 4 months
    M4,
    /// 6 months
    M6,
    /// 1 year
    Y1,
    /// 2 years
    Y2,
    /// 3 years
    Y3,
    /// 5 years
    Y5,
    /// 7 years
    Y7,
    /// 10 years
    Y10,
    /// 20 years
    Y20,
    /// 30 years
    Y30,
}

impl Term {
    /// Number of canonical terms.
    pub const COUNT: usize = 14;

    /// All terms in canonical order.
    pub const ALL: [Term; Term::COUNT] = [
        Term::M1,
        Term::M1_5,
        Term::M2,
        Term::M3,
        Term::M4,
        Term::M6,
        Term::Y1,
        Term::Y2,
        Term::Y3,
        Term::Y5,
        Term::Y7,
        Term::Y10,
        Term::Y20,
        Term::Y30,
    ];

    /// Returns the canonical label, e.g. `"1.5M"` or `"10Y"`.
    pub fn label(self) -> &'static str {
        match self {
            Term::M1 => "1M",
            Term::M1_5 => "1.5M",
            Term::M2 => "2M",
            Term::M3 => "3M",
            Term::M4 => "4M",
            Term::M6 => "6M",
            Term::Y1 => "1Y",
            Term::Y2 => "2Y",
            Term::Y3 => "3Y",
            Term::Y5 => "5Y",
            Term::Y7 => "7Y",
            Term::Y10 => "10Y",
            Term::Y20 => "20Y",
            Term::Y30 => "30Y",
        }
    }

    /// Returns the raw feed field key carrying this term's rate.
    pub fn field_key(self) -> &'static str {
        match self {
            Term::M1 => "BC_1MONTH",
            Term::M1_5 => "BC_1_5MONTH",
            Term::M2 => "BC_2MONTH",
            Term::M3 => "BC_3MONTH",
            Term::M4 => "BC_4MONTH",
            Term::M6 => "BC_6MONTH",
            Term::Y1 => "BC_1YEAR",
            Term::Y2 => "BC_2YEAR",
            Term::Y3 => "BC_3YEAR",
            Term::Y5 => "BC_5YEAR",
            Term::Y7 => "BC_7YEAR",
            Term::Y10 => "BC_10YEAR",
            Term::Y20 => "BC_20YEAR",
            Term::Y30 => "BC_30YEAR",
        }
    }

    /// Looks up the term for an upper-cased feed field key.
    ///
    /// Keys outside the table (e.g. `BC_30YEARDISPLAY`) return `None`.
    pub fn from_field_key(key: &str) -> Option<Term> {
        Term::ALL.into_iter().find(|t| t.field_key() == key)
    }

    /// Position of this term in the canonical order.
    pub fn ordinal(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Term {
    type Err = CoreError;

    /// Parses a canonical label, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Term::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::unknown_term(trimmed))
    }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Term {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let labels: Vec<&str> = Term::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(
            labels,
            ["1M", "1.5M", "2M", "3M", "4M", "6M", "1Y", "2Y", "3Y", "5Y", "7Y", "10Y", "20Y", "30Y"]
        );
        assert!(Term::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_field_key_table() {
        assert_eq!(Term::from_field_key("BC_1MONTH"), Some(Term::M1));
        assert_eq!(Term::from_field_key("BC_1_5MONTH"), Some(Term::M1_5));
        assert_eq!(Term::from_field_key("BC_10YEAR"), Some(Term::Y10));
        assert_eq!(Term::from_field_key("BC_30YEAR"), Some(Term::Y30));
        assert_eq!(Term::from_field_key("BC_30YEARDISPLAY"), None);
        assert_eq!(Term::from_field_key("bc_1month"), None);

        for term in Term::ALL {
            assert_eq!(Term::from_field_key(term.field_key()), Some(term));
        }
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("10y".parse::<Term>().unwrap(), Term::Y10);
        assert_eq!(" 1.5m ".parse::<Term>().unwrap(), Term::M1_5);
        assert!("15Y".parse::<Term>().is_err());
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&Term::M1_5).unwrap();
        assert_eq!(json, "\"1.5M\"");
        let parsed: Term = serde_json::from_str("\"30y\"").unwrap();
        assert_eq!(parsed, Term::Y30);
    }
}
