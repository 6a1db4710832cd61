//! Treasury yield curve server entry point.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use treasury_engine::YieldServiceBuilder;
use treasury_ext_file::FileFeedSource;
use treasury_ext_http::TreasuryHttpFeed;
use treasury_server::{Server, ServerConfig};
use treasury_traits::feed::FeedSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,treasury=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Treasury Yield Curve Server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/treasury.toml".to_string());

    let server_config = if std::path::Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        ServerConfig::from_file(&config_path)
            .with_context(|| format!("failed to load {config_path}"))?
    } else {
        info!("Using default configuration");
        ServerConfig::default()
    };

    // Feed: saved documents if a directory is configured, otherwise live
    let feed: Arc<dyn FeedSource> = match &server_config.feed_dir {
        Some(dir) => {
            info!("Reading feed documents from {}", dir);
            Arc::new(FileFeedSource::new(dir))
        }
        None => {
            info!("Fetching feed from {}", server_config.feed.base_url);
            Arc::new(TreasuryHttpFeed::new(&server_config.feed)?)
        }
    };

    let service = YieldServiceBuilder::new()
        .with_feed(feed)
        .with_cache_config(server_config.cache.clone())
        .with_fallback_cutoff(server_config.fallback_cutoff)
        .build()?;

    let server = Server::new(server_config, Arc::new(service));
    server.start().await?;

    Ok(())
}
