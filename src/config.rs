//! Configuration loading from TOML.
//!
//! Reads an optional `config.toml` and deserializes into strongly-typed
//! structs. Every field has a default, so the program runs without any
//! config file; a file only needs to name the fields it overrides. The
//! results API requires no authentication, so there are no secrets here.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default results API endpoint (El País Christmas Lottery service).
const DEFAULT_BASE_URL: &str = "http://api.elpais.com/ws/LoteriaNavidadPremiados";

/// Default seconds between polling passes while the draw is in progress.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 120;

/// Default per-request HTTP timeout.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub poller: PollerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the results API; queries are dispatched by query
    /// parameter on this single endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollerConfig {
    /// Seconds to sleep between polling passes.
    #[serde(default = "default_poll_interval_secs")]
    pub interval_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration from `path` if it exists, falling back to the
    /// built-in defaults otherwise. A file that exists but cannot be read
    /// or parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
