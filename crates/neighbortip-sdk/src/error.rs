//! Error types for the Neighbortip SDK.

use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// Proxy answered with a non-success status
    #[error("Proxy error (HTTP {status}): {message}")]
    ProxyError {
        /// HTTP status code
        status: u16,
        /// Error message from the proxy body, or the status text
        message: String,
    },

    /// Connection error (network, DNS, timeout, etc.)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Proxy endpoint is unusable (bad URL, client could not be built)
    #[error("Invalid proxy endpoint: {0}")]
    InvalidEndpoint(String),
}

impl SdkError {
    /// Whether the error means no further lookup can succeed
    ///
    /// Per-lookup failures are reported as "not found" by the sweep; only
    /// fatal errors stop it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SdkError::InvalidEndpoint(_))
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            SdkError::InvalidEndpoint(e.to_string())
        } else if e.is_connect() || e.is_timeout() {
            SdkError::ConnectionError(e.to_string())
        } else if e.is_decode() {
            SdkError::InvalidResponse(e.to_string())
        } else if e.is_status() {
            match e.status() {
                Some(status) => SdkError::ProxyError {
                    status: status.as_u16(),
                    message: e.to_string(),
                },
                None => SdkError::ConnectionError(e.to_string()),
            }
        } else {
            SdkError::ConnectionError(e.to_string())
        }
    }
}
