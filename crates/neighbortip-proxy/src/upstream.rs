//! Outbound calls to the hosted directory service.

use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Failure talking to the directory
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The directory answered with a non-success status
    #[error("Directory returned {status}: {status_text}")]
    Status {
        /// Status code to forward
        status: StatusCode,
        /// Reason phrase for the status
        status_text: String,
    },

    /// The directory could not be reached or sent an unreadable body
    #[error("Directory transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

/// HTTP client for the directory's proofs-by-FID endpoint
#[derive(Debug, Clone)]
pub struct DirectoryUpstream {
    base_url: String,
    client: reqwest::Client,
}

impl DirectoryUpstream {
    /// Create a client for `base_url` with the given per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Base endpoint this client queries
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for a lookup; the FID text is substituted as given
    pub fn lookup_url(&self, fid: &str) -> String {
        format!("{}?fid={}", self.base_url, fid)
    }

    /// Fetch the proofs for `fid` and return the JSON body untouched
    ///
    /// A single request is made; there is no retry.
    pub async fn fetch(&self, fid: &str) -> Result<Value, UpstreamError> {
        let url = self.lookup_url(fid);
        debug!("Forwarding lookup to {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status,
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}
