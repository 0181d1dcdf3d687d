//! Client configuration.
//!
//! Resolved once at startup from built-in defaults overridden by
//! `DOJADE_*` environment variables, then handed to the API client and
//! cache store.

use std::path::PathBuf;
use std::time::Duration;

use crate::cache;

/// Backend root used when `DOJADE_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Per-request timeout used when `DOJADE_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

/// Settings shared by every service in this crate.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend API root, e.g. `http://localhost:3000/api`.
    pub base_url: String,
    /// Timeout applied to each HTTP request.
    pub timeout: Duration,
    /// Directory holding cached JSON entries.
    pub cache_dir: PathBuf,
    /// Maximum age before a cache entry is discarded.
    pub cache_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            cache_dir: default_cache_dir(),
            cache_ttl: cache::DEFAULT_TTL,
        }
    }
}

impl ClientConfig {
    /// Builds a config from defaults plus `DOJADE_API_URL`,
    /// `DOJADE_CACHE_DIR` and `DOJADE_TIMEOUT_SECS` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("DOJADE_API_URL") {
            config.base_url = url;
        }
        if let Ok(dir) = std::env::var("DOJADE_CACHE_DIR") {
            config.cache_dir = PathBuf::from(dir);
        }
        if let Ok(secs) = std::env::var("DOJADE_TIMEOUT_SECS") {
            config.timeout = parse_secs("DOJADE_TIMEOUT_SECS", &secs)?;
        }
        Ok(config)
    }
}

fn parse_secs(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::Invalid {
            name,
            value: value.to_owned(),
        })
}

fn default_cache_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".cache").join("dojade"),
        None => std::env::temp_dir().join("dojade-cache"),
    }
}
