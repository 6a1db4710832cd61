//! # Treasury Ext HTTP
//!
//! HTTP [`FeedSource`] for the US Treasury daily par yield curve XML feed.
//!
//! One GET per reporting month against
//! `<base_url>?data=daily_treasury_yield_curve&field_tdr_date_value_month=YYYYMM`,
//! with bounded connect/response timeouts and no retries.

#![warn(missing_docs)]
#![warn(clippy::all)]

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use tracing::{debug, warn};

use treasury_core::YearMonth;
use treasury_traits::config::FeedConfig;
use treasury_traits::error::FeedError;
use treasury_traits::feed::FeedSource;

/// Feed client for the Treasury XML endpoint.
#[derive(Debug, Clone)]
pub struct TreasuryHttpFeed {
    client: reqwest::Client,
    base_url: String,
}

impl TreasuryHttpFeed {
    /// Build a client from feed configuration.
    ///
    /// Fails only if the TLS backend cannot be initialised or the configured
    /// user agent is not a valid header value.
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/xml"));

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .gzip(true)
            .connect_timeout(config.connect_timeout())
            .timeout(config.response_timeout())
            .build()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Request URL for a reporting month.
    pub fn month_url(&self, month: YearMonth) -> String {
        format!(
            "{}?data=daily_treasury_yield_curve&field_tdr_date_value_month={}",
            self.base_url, month
        )
    }
}

#[async_trait]
impl FeedSource for TreasuryHttpFeed {
    fn name(&self) -> &str {
        "treasury-http"
    }

    async fn fetch_month(&self, month: YearMonth) -> Result<String, FeedError> {
        let url = self.month_url(month);
        debug!(%url, "requesting Treasury XML");

        let response = self.client.get(&url).send().await.map_err(classify)?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            warn!(%month, status = status.as_u16(), "Treasury HTTP error");
            return Err(FeedError::Status(status.as_u16()));
        }

        response.text().await.map_err(classify)
    }
}

fn classify(e: reqwest::Error) -> FeedError {
    if e.is_timeout() {
        FeedError::Timeout
    } else if let Some(status) = e.status() {
        FeedError::Status(status.as_u16())
    } else {
        FeedError::Network(e.to_string())
    }
}
