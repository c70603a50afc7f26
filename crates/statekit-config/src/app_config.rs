//! Application configuration
//!
//! Configuration loaded from `.statekit.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from `.statekit.toml`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Freshness window of fetch slices, in milliseconds
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,

    /// HTTP request timeout, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Photo listing fetched by the photos slice
    #[serde(default = "default_photos_url")]
    pub photos_url: String,

    /// Where persisted slices are written (default: `<data dir>/statekit/storage`)
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

fn default_cache_ttl_ms() -> u64 {
    5000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_photos_url() -> String {
    "https://dogsapi.origamid.dev/json/api/photo/?_page=1&_total=6&_user=0".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_ttl_ms: default_cache_ttl_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            photos_url: default_photos_url(),
            storage_dir: None,
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::parse(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured storage directory, or the platform default
    pub fn resolve_storage_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.storage_dir {
            Some(dir) => Ok(dir.clone()),
            None => crate::paths::default_storage_dir(),
        }
    }
}
