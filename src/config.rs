//! Configuration management for the Arctic Wolf NFS client
//!
//! Loads configuration from:
//! 1. An explicit path (if provided)
//! 2. Default path `/etc/arcticwolf/client.toml` (falls back to defaults if not found)

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::protocol::v3::constants::{DEFAULT_CLOCK_HZ, DEFAULT_TICK_INTERVAL_MS};

const DEFAULT_CONFIG_PATH: &str = "/etc/arcticwolf/client.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub protocol: ProtocolConfig,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Clock resolution in ticks per second
    pub clock_hz: u32,
    /// Protocol timer interval in milliseconds
    pub tick_interval_ms: u32,
}

/// Backoff applied when an NFSv3 server asks the client to try later
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub initial_delay_ms: u64,
    pub multiplier: u32,
    pub max_delay_ms: u64,
    /// Wait out the delay before retrying. When false, retry immediately.
    pub sleep: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level. If not set, falls back to RUST_LOG env var, then "info"
    pub level: Option<String>,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            clock_hz: DEFAULT_CLOCK_HZ,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 1000,
            multiplier: 2,
            max_delay_ms: 60_000,
            sleep: true,
        }
    }
}

impl RetryConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

impl LoggingConfig {
    /// Get log level with fallback: config -> RUST_LOG -> "info"
    pub fn effective_level(&self) -> String {
        match self.level.as_deref() {
            Some(level) => level.to_string(),
            None => std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default path if none is given
    ///
    /// A missing explicit path is an error; a missing default path yields defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (config_path, user_specified) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            debug!("Config: {}", config_path.display());
            Ok(config)
        } else if user_specified {
            anyhow::bail!("Configuration file not found: {}", config_path.display());
        } else {
            debug!("Config: using defaults");
            Ok(Config::default())
        }
    }
}
