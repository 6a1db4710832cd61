//! Server configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use treasury_traits::config::{CacheConfig, FallbackCutoff, FeedConfig};

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory of saved monthly feed documents. When set, the feed is read
    /// from disk instead of the Treasury endpoint.
    pub feed_dir: Option<String>,

    /// Live feed settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Curve cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Cutoff used for the previous-month fallback
    #[serde(default)]
    pub fallback_cutoff: FallbackCutoff,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            feed_dir: None,
            feed: FeedConfig::default(),
            cache: CacheConfig::default(),
            fallback_cutoff: FallbackCutoff::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, std::io::Error> {
        toml::from_str(content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
