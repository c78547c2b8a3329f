//! Configuration file parsing for the Directory Proxy.
//!
//! Loads settings from TOML files including bind address, the upstream
//! directory endpoint and the outbound request timeout.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Directory endpoint used when none is configured
pub const DEFAULT_UPSTREAM_URL: &str = "https://hub.pinata.cloud/v1/userNameProofsByFid";

/// Proxy configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),
}

/// Proxy configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 3000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Directory endpoint; the FID is appended as `?fid=<value>`
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,

    /// Timeout for each outbound request in seconds (default: 10)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    3000
}

fn default_upstream_url() -> String {
    DEFAULT_UPSTREAM_URL.to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl ProxyConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ProxyConfig = toml::from_str(&contents)?;

        if config.upstream_url.trim().is_empty() {
            return Err(ConfigError::MissingField("upstream_url".to_string()));
        }

        Ok(config)
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Outbound request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        ProxyConfig {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            upstream_url: default_upstream_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}
