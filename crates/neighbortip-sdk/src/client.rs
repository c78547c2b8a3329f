//! Directory lookups through the Neighbortip proxy.

use crate::error::SdkError;
use async_trait::async_trait;
use neighbortip_domain::{Fid, Neighbor, ProofResponse};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for a single lookup
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Anything that can answer "which proofs exist for this FID"
#[async_trait]
pub trait DirectoryLookup: Send + Sync {
    /// Fetch the directory response for `fid`
    async fn lookup(&self, fid: Fid) -> Result<ProofResponse, SdkError>;

    /// Resolve `fid` to a neighbor
    ///
    /// Failed lookups and empty proof lists are both `Ok(None)`. Only a
    /// fatal error (see [`SdkError::is_fatal`]) is returned.
    async fn resolve(&self, fid: Fid) -> Result<Option<Neighbor>, SdkError> {
        match self.lookup(fid).await {
            Ok(response) => {
                let neighbor = response.first_neighbor();
                if neighbor.is_none() {
                    debug!("No proofs for FID {}", fid);
                }
                Ok(neighbor)
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!("Error fetching FID {}: {}", fid, e);
                Ok(None)
            }
        }
    }
}

/// Error body returned by the proxy
#[derive(Debug, Deserialize)]
struct ProxyErrorBody {
    error: String,
}

/// HTTP client for the proxy's lookup endpoint
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    proxy_endpoint: String,
    http_client: reqwest::Client,
}

impl DirectoryClient {
    /// Create a client with the default timeout
    pub fn new(proxy_endpoint: &str) -> Result<Self, SdkError> {
        Self::with_timeout(proxy_endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom per-request timeout
    pub fn with_timeout(proxy_endpoint: &str, timeout: Duration) -> Result<Self, SdkError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SdkError::InvalidEndpoint(e.to_string()))?;

        Ok(Self {
            proxy_endpoint: proxy_endpoint.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Proxy base URL
    pub fn endpoint(&self) -> &str {
        &self.proxy_endpoint
    }

    /// Check that the proxy is up
    pub async fn health(&self) -> Result<(), SdkError> {
        let url = format!("{}/health", self.proxy_endpoint);
        let response = self.http_client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            return Err(SdkError::ProxyError {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DirectoryLookup for DirectoryClient {
    async fn lookup(&self, fid: Fid) -> Result<ProofResponse, SdkError> {
        let url = format!("{}/api/farcaster?fid={}", self.proxy_endpoint, fid);
        debug!("Attempting to fetch data for FID {}", fid);

        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = match response.json::<ProxyErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_string(),
            };
            return Err(SdkError::ProxyError {
                status: status.as_u16(),
                message,
            });
        }

        let proofs: ProofResponse = response.json().await?;
        debug!("FID {} returned {} proof(s)", fid, proofs.proofs.len());
        Ok(proofs)
    }
}
