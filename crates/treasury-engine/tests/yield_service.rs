//! Integration tests for the yield service: cache, fallback and concurrency.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;

use treasury_core::{Curve, Date, Term, YearMonth, YieldPoint};
use treasury_engine::{YieldService, YieldServiceBuilder};
use treasury_ext_file::{InMemoryFeedSource, ManualClock};
use treasury_traits::{Clock, FallbackCutoff, FeedError};

fn date(s: &str) -> Date {
    Date::parse(s).unwrap()
}

fn jan() -> YearMonth {
    YearMonth::new(2024, 1).unwrap()
}

fn dec_2023() -> YearMonth {
    YearMonth::new(2023, 12).unwrap()
}

/// One feed entry with the given rate fields.
fn entry(day: &str, fields: &[(&str, &str)]) -> String {
    let mut xml = String::from("<entry><content type=\"application/xml\"><m:properties>");
    xml.push_str(&format!("<d:NEW_DATE>{day}T00:00:00</d:NEW_DATE>"));
    for (key, value) in fields {
        xml.push_str(&format!("<d:{key}>{value}</d:{key}>"));
    }
    xml.push_str("</m:properties></content></entry>");
    xml
}

fn document(entries: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <feed xmlns=\"http://www.w3.org/2005/Atom\" \
         xmlns:d=\"http://schemas.microsoft.com/ado/2007/08/dataservices\" \
         xmlns:m=\"http://schemas.microsoft.com/ado/2007/08/dataservices/metadata\">{}</feed>",
        entries.concat()
    )
}

fn january_document() -> String {
    document(&[entry(
        "2024-01-15",
        &[("BC_1MONTH", "4.25"), ("BC_2MONTH", "N/A"), ("BC_2YEAR", "4.75")],
    )])
}

fn december_document() -> String {
    document(&[
        entry("2023-12-14", &[("BC_10YEAR", "4.02")]),
        entry("2023-12-29", &[("BC_10YEAR", "3.88")]),
    ])
}

fn expected_january() -> Curve {
    Curve::from(vec![
        YieldPoint::new(Term::M1, dec!(4.25)),
        YieldPoint::new(Term::Y2, dec!(4.75)),
    ])
}

fn service(feed: &Arc<InMemoryFeedSource>, clock: &Arc<ManualClock>) -> YieldService {
    YieldServiceBuilder::new()
        .with_feed(Arc::clone(feed) as _)
        .with_clock(Arc::clone(clock) as _)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_current_month_success() {
    let feed = Arc::new(InMemoryFeedSource::new().with_document(jan(), january_document()));
    let clock = Arc::new(ManualClock::at(date("2024-01-15")));
    let service = service(&feed, &clock);

    let curve = service.current_curve().await;

    assert_eq!(curve, expected_january());
    assert_eq!(feed.requests(), [jan()]);
    let entry = service.cache().read().unwrap();
    assert_eq!(entry.curve(), expected_january());
    assert_eq!(entry.fetched_at(), clock.now());
}

#[tokio::test]
async fn test_falls_back_to_previous_month() {
    let feed = Arc::new(
        InMemoryFeedSource::new()
            .with_failure(jan(), FeedError::Status(500))
            .with_document(dec_2023(), december_document()),
    );
    let clock = Arc::new(ManualClock::at(date("2024-01-15")));
    let service = service(&feed, &clock);

    let curve = service.current_curve().await;

    // cutoff is 2023-12-15, so the 12-29 entry is excluded
    assert_eq!(curve.points(), [YieldPoint::new(Term::Y10, dec!(4.02))]);
    assert_eq!(feed.requests(), [jan(), dec_2023()]);
    assert_eq!(service.cache().read().unwrap().curve(), curve);
}

#[tokio::test]
async fn test_fallback_with_today_cutoff() {
    let feed = Arc::new(
        InMemoryFeedSource::new()
            .with_failure(jan(), FeedError::Timeout)
            .with_document(dec_2023(), december_document()),
    );
    let clock = Arc::new(ManualClock::at(date("2024-01-15")));
    let service = YieldServiceBuilder::new()
        .with_feed(Arc::clone(&feed) as _)
        .with_clock(Arc::clone(&clock) as _)
        .with_fallback_cutoff(FallbackCutoff::Today)
        .build()
        .unwrap();

    let curve = service.current_curve().await;
    assert_eq!(curve.rate_for(Term::Y10), Some(dec!(3.88)));
}

#[tokio::test]
async fn test_current_month_without_qualifying_entry_falls_back() {
    // Early in the month: the document only holds entries after today.
    let feed = Arc::new(
        InMemoryFeedSource::new()
            .with_document(jan(), document(&[entry("2024-01-03", &[("BC_1MONTH", "5.55")])]))
            .with_document(dec_2023(), december_document()),
    );
    let clock = Arc::new(ManualClock::at(date("2024-01-02")));
    let service = service(&feed, &clock);

    let curve = service.current_curve().await;

    // fallback cutoff 2023-12-02 precedes every December entry
    assert!(curve.is_empty());
    assert_eq!(feed.request_count(), 2);
    assert!(service.cache().read().is_none());
}

#[tokio::test]
async fn test_fallback_cutoff_clamps_to_month_end() {
    let feed = Arc::new(InMemoryFeedSource::new());
    let clock = Arc::new(ManualClock::at(date("2024-03-31")));
    let service = service(&feed, &clock);

    assert_eq!(
        service.fallback_cutoff_for(date("2024-03-31")).unwrap(),
        date("2024-02-29")
    );

    feed.set_document(
        YearMonth::new(2024, 2).unwrap(),
        document(&[entry("2024-02-29", &[("BC_3MONTH", "5.46")])]),
    );
    let curve = service.current_curve().await;
    assert_eq!(curve.rate_for(Term::M3), Some(dec!(5.46)));
    assert_eq!(
        feed.requests(),
        [YearMonth::new(2024, 3).unwrap(), YearMonth::new(2024, 2).unwrap()]
    );
}

#[tokio::test]
async fn test_january_falls_back_to_december() {
    let feed = Arc::new(InMemoryFeedSource::new());
    let clock = Arc::new(ManualClock::at(date("2024-01-15")));
    let service = service(&feed, &clock);

    assert!(service.current_curve().await.is_empty());
    assert_eq!(feed.requests(), [jan(), dec_2023()]);
}

#[tokio::test]
async fn test_both_months_fail_leaves_cache_untouched() {
    let feed = Arc::new(InMemoryFeedSource::new().with_document(jan(), january_document()));
    let clock = Arc::new(ManualClock::at(date("2024-01-15")));
    let service = service(&feed, &clock);

    assert_eq!(service.current_curve().await, expected_january());
    let first_fetch = service.cache().read().unwrap().fetched_at();

    clock.advance(chrono::Duration::minutes(31));
    feed.set_failure(jan(), FeedError::Network("connection reset".into()));
    feed.set_failure(dec_2023(), FeedError::Status(503));

    let curve = service.current_curve().await;

    assert!(curve.is_empty());
    assert_eq!(service.cache().read().unwrap().fetched_at(), first_fetch);
}

#[tokio::test]
async fn test_unparseable_documents_yield_empty() {
    let feed = Arc::new(
        InMemoryFeedSource::new()
            .with_document(jan(), "<html>maintenance</body>")
            .with_document(dec_2023(), ""),
    );
    let clock = Arc::new(ManualClock::at(date("2024-01-15")));
    let service = service(&feed, &clock);

    assert!(service.current_curve().await.is_empty());
    assert!(service.cache().read().is_none());
}

#[tokio::test]
async fn test_fresh_cache_skips_feed() {
    let feed = Arc::new(InMemoryFeedSource::new().with_document(jan(), january_document()));
    let clock = Arc::new(ManualClock::at(date("2024-01-15")));
    let service = service(&feed, &clock);

    service.current_curve().await;
    clock.advance(chrono::Duration::minutes(29));
    let curve = service.current_curve().await;

    assert_eq!(curve, expected_january());
    assert_eq!(feed.request_count(), 1);
}

#[tokio::test]
async fn test_stale_cache_refetches() {
    let feed = Arc::new(InMemoryFeedSource::new().with_document(jan(), january_document()));
    let clock = Arc::new(ManualClock::at(date("2024-01-15")));
    let service = service(&feed, &clock);

    service.current_curve().await;
    clock.advance(chrono::Duration::minutes(30));
    feed.set_document(
        jan(),
        document(&[entry("2024-01-15", &[("BC_1MONTH", "4.30")])]),
    );

    let curve = service.current_curve().await;

    assert_eq!(curve.points(), [YieldPoint::new(Term::M1, dec!(4.30))]);
    assert_eq!(feed.request_count(), 2);
    assert_eq!(service.cache().read().unwrap().fetched_at(), clock.now());
}

#[tokio::test]
async fn test_empty_result_is_not_cached() {
    let feed = Arc::new(InMemoryFeedSource::new());
    let clock = Arc::new(ManualClock::at(date("2024-01-15")));
    let service = service(&feed, &clock);

    assert!(service.current_curve().await.is_empty());
    feed.set_document(jan(), january_document());
    assert_eq!(service.current_curve().await, expected_january());
    assert_eq!(feed.request_count(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_cold_cache_callers() {
    let feed = Arc::new(
        InMemoryFeedSource::new()
            .with_document(jan(), january_document())
            .with_latency(Duration::from_millis(25)),
    );
    let clock = Arc::new(ManualClock::at(date("2024-01-15")));
    let service = Arc::new(service(&feed, &clock));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.current_curve().await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), expected_january());
    }

    let requests = feed.request_count();
    assert!((1..=8).contains(&requests), "unexpected request count {requests}");
    assert_eq!(service.cache().read().unwrap().curve(), expected_january());
}
