//! Neighbortip Directory Proxy
//!
//! Stateless pass-through that forwards a FID lookup to the hosted
//! directory service and relays its JSON response unchanged.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod upstream;

use config::ProxyConfig;
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use upstream::DirectoryUpstream;

/// Proxy error
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Outbound HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the application state for a configuration
pub fn build_state(config: &ProxyConfig) -> Result<AppState, ProxyError> {
    let upstream = DirectoryUpstream::new(config.upstream_url.clone(), config.request_timeout())?;
    Ok(AppState {
        upstream: Arc::new(upstream),
    })
}

/// Start the Proxy HTTP server
///
/// Builds the upstream client, binds the listener and serves until the
/// process is stopped.
pub async fn start_server(config: ProxyConfig) -> Result<(), ProxyError> {
    info!("Starting Neighbortip Directory Proxy");
    info!("Bind address: {}", config.bind_addr());
    info!("Upstream directory: {}", config.upstream_url);
    info!("Request timeout: {} seconds", config.request_timeout_secs);

    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Proxy listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ProxyError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_state() {
        let config = ProxyConfig::default();
        let state = build_state(&config).unwrap();
        assert_eq!(state.upstream.base_url(), config::DEFAULT_UPSTREAM_URL);
    }
}
