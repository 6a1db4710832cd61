//! Curve extraction from the Treasury XML feed.
//!
//! The feed is an Atom document: one `entry` per business day, each holding
//! a date element (`NEW_DATE`, `CMTDATE` or `DATE`) and one `BC_*` element per
//! published maturity. Elements are matched by local name, so `d:BC_2YEAR`
//! and `BC_2YEAR` are the same field.

use std::collections::BTreeMap;
use std::str::FromStr;

use quick_xml::events::Event;
use quick_xml::Reader;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use treasury_core::{canonicalize, Curve, Date, Term, YieldPoint};

use crate::error::ExtractError;

/// Element local names that carry an entry's observation date.
const DATE_TAGS: [&str; 3] = ["NEW_DATE", "CMTDATE", "DATE"];

/// Prefix shared by every rate field.
const RATE_FIELD_PREFIX: &str = "BC_";

/// Marker the feed uses for an unpublished rate.
const NOT_AVAILABLE: &str = "N/A";

/// Turns a raw feed document into a curve.
///
/// Implementations are total: malformed input yields [`Curve::Empty`].
pub trait CurveExtractor: Send + Sync {
    /// Extract the curve of the latest entry dated on or before `cutoff`.
    fn extract(&self, document: &str, cutoff: Date) -> Curve;
}

/// Streaming, namespace-agnostic XML extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCurveExtractor;

impl CurveExtractor for XmlCurveExtractor {
    fn extract(&self, document: &str, cutoff: Date) -> Curve {
        extract_curve(document, cutoff)
    }
}

/// One dated observation from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Observation date, time of day discarded
    pub date: Date,
    /// Upper-cased field key to rate; unpublished values are absent
    pub fields: BTreeMap<String, Decimal>,
}

impl RawEntry {
    /// Map known field keys to yield points in table order; unknown keys are dropped.
    pub fn to_points(&self) -> Vec<YieldPoint> {
        Term::ALL
            .into_iter()
            .filter_map(|term| {
                self.fields
                    .get(term.field_key())
                    .map(|rate| YieldPoint::new(term, *rate))
            })
            .collect()
    }
}

/// Extract the canonical curve of the latest entry dated on or before `cutoff`.
///
/// Never fails: blank documents, XML errors and documents without a
/// qualifying entry all yield [`Curve::Empty`].
pub fn extract_curve(document: &str, cutoff: Date) -> Curve {
    if document.trim().is_empty() {
        debug!(%cutoff, "blank feed document");
        return Curve::Empty;
    }

    match select_entry(document, cutoff) {
        Ok(entry) => {
            let curve = canonicalize(entry.to_points());
            debug!(
                %cutoff,
                date = %entry.date,
                fields = entry.fields.len(),
                points = curve.len(),
                "selected feed entry"
            );
            curve
        }
        Err(e @ ExtractError::NoQualifyingData { .. }) => {
            debug!(%cutoff, bytes = document.len(), "{e}");
            Curve::Empty
        }
        Err(e) => {
            warn!(%cutoff, bytes = document.len(), error = %e, "failed to parse feed document");
            Curve::Empty
        }
    }
}

/// Find the entry with the latest date on or before `cutoff` that carries at
/// least one numeric rate field. Ties go to the entry seen first.
pub fn select_entry(document: &str, cutoff: Date) -> Result<RawEntry, ExtractError> {
    let mut reader = Reader::from_str(document);
    reader.config_mut().trim_text(true);

    let mut entries = 0usize;
    let mut best: Option<RawEntry> = None;
    let mut pending: Option<PendingEntry> = None;
    let mut capture: Option<(Capture, String)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let local = e.local_name();
                let name = element_name(local.as_ref());
                if name.eq_ignore_ascii_case("entry") {
                    pending = Some(PendingEntry::default());
                    capture = None;
                } else if let Some(entry) = pending.as_ref() {
                    capture = entry.classify(name).map(|kind| (kind, String::new()));
                }
            }
            Event::Empty(e) => {
                // Self-closing element: a field without a value.
                let local = e.local_name();
                let name = element_name(local.as_ref());
                if let Some(entry) = pending.as_mut() {
                    if let Some(kind) = entry.classify(name) {
                        entry.accept(kind, "");
                    }
                }
            }
            Event::Text(t) => {
                if let Some((_, text)) = capture.as_mut() {
                    match t.unescape() {
                        Ok(value) => text.push_str(&value),
                        Err(e) => {
                            // Only this field is lost; the rest of the entry still counts.
                            debug!(error = %e, "dropping field with undecodable text");
                            capture = None;
                        }
                    }
                }
            }
            Event::CData(c) => {
                if let Some((_, text)) = capture.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(e) => {
                let local = e.local_name();
                let name = element_name(local.as_ref());
                if name.eq_ignore_ascii_case("entry") {
                    capture = None;
                    if let Some(entry) = pending.take() {
                        entries += 1;
                        if let Some(candidate) = entry.finish(cutoff) {
                            if best.as_ref().map_or(true, |b| candidate.date > b.date) {
                                best = Some(candidate);
                            }
                        }
                    }
                } else if let (Some((kind, text)), Some(entry)) = (capture.take(), pending.as_mut()) {
                    entry.accept(kind, &text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    best.ok_or(ExtractError::NoQualifyingData { entries, cutoff })
}

/// What the element currently being read holds.
enum Capture {
    Date,
    Field(String),
}

/// An `entry` element still being read.
#[derive(Default)]
struct PendingEntry {
    date_text: Option<String>,
    fields: BTreeMap<String, Decimal>,
}

impl PendingEntry {
    fn classify(&self, name: &str) -> Option<Capture> {
        let upper = name.to_ascii_uppercase();
        if DATE_TAGS.contains(&upper.as_str()) {
            // first date element wins
            self.date_text.is_none().then_some(Capture::Date)
        } else if upper.starts_with(RATE_FIELD_PREFIX) {
            Some(Capture::Field(upper))
        } else {
            None
        }
    }

    fn accept(&mut self, kind: Capture, text: &str) {
        match kind {
            Capture::Date => {
                if self.date_text.is_none() {
                    self.date_text = Some(text.to_string());
                }
            }
            Capture::Field(key) => {
                if let Some(rate) = parse_rate(text) {
                    self.fields.insert(key, rate);
                }
            }
        }
    }

    fn finish(self, cutoff: Date) -> Option<RawEntry> {
        let date = parse_feed_date(self.date_text.as_deref()?)?;
        if date > cutoff || self.fields.is_empty() {
            return None;
        }
        Some(RawEntry {
            date,
            fields: self.fields,
        })
    }
}

/// Names from a `&str` reader are always UTF-8; anything else matches nothing.
fn element_name(bytes: &[u8]) -> &str {
    std::str::from_utf8(bytes).unwrap_or_default()
}

/// `2024-01-15T00:00:00` and `2024-01-15` both parse to 2024-01-15.
fn parse_feed_date(text: &str) -> Option<Date> {
    let day = text.trim().split('T').next()?;
    Date::parse(day.trim()).ok()
}

fn parse_rate(text: &str) -> Option<Decimal> {
    let value = text.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(NOT_AVAILABLE) {
        return None;
    }
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}
