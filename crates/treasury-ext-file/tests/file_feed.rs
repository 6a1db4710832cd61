//! Tests for the directory-backed feed source.

use treasury_core::YearMonth;
use treasury_ext_file::FileFeedSource;
use treasury_traits::{FeedError, FeedSource};

#[tokio::test]
async fn test_reads_month_document() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("202401.xml"), "<feed></feed>").unwrap();

    let source = FileFeedSource::new(dir.path());
    let body = source
        .fetch_month(YearMonth::new(2024, 1).unwrap())
        .await
        .unwrap();
    assert_eq!(body, "<feed></feed>");
}

#[tokio::test]
async fn test_missing_month_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileFeedSource::new(dir.path());

    let err = source
        .fetch_month(YearMonth::new(2023, 12).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::NotFound(path) if path.ends_with("202312.xml")));
}

#[tokio::test]
async fn test_directory_in_place_of_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("202402.xml")).unwrap();

    let source = FileFeedSource::new(dir.path());
    let err = source
        .fetch_month(YearMonth::new(2024, 2).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::Io(_)), "unexpected error: {err:?}");
}
