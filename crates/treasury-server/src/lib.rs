//! # Treasury Server
//!
//! REST server for the Treasury yield curve service.
//!
//! ## Features
//!
//! - Current par yield curve at `GET /api/v1/yield-curve`
//! - In-memory order submission stamped with the curve rate
//! - Health endpoints
//! - Configuration via TOML file
//!
//! ## Usage
//!
//! ```ignore
//! use treasury_server::Server;
//!
//! let server = Server::new(config, service);
//! server.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod handlers;
pub mod routes;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use treasury_engine::YieldService;

pub use config::ServerConfig;

/// The Treasury server.
pub struct Server {
    config: ServerConfig,
    service: Arc<YieldService>,
}

impl Server {
    /// Create a new server.
    pub fn new(config: ServerConfig, service: Arc<YieldService>) -> Self {
        Self { config, service }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.service.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Socket address from the configured host and port.
    ///
    /// The host must be an IP literal; anything else is `InvalidInput`.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::io::Error> {
        let ip: IpAddr = self.config.host.parse().map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid host address: {:?}", self.config.host),
            )
        })?;
        Ok(SocketAddr::new(ip, self.config.port))
    }

    /// Start the server.
    pub async fn start(&self) -> Result<(), std::io::Error> {
        let addr = self.bind_addr()?;

        info!("Starting Treasury server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await
    }
}
