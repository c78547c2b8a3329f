//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SDK error
    #[error("{0}")]
    Sdk(#[from] neighbortip_sdk::SdkError),

    /// Wallet error
    #[error("Wallet error: {0}")]
    Wallet(#[from] neighbortip_sdk::WalletError),

    /// Invalid FID or amount
    #[error("{0}")]
    Domain(#[from] neighbortip_domain::DomainError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Nothing found for a FID
    #[error("{0}")]
    NotFound(String),

    /// Transaction was not sent
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// No wallet connected
    #[error("No wallet connected. Use 'connect' command first.")]
    NotConnected,
}
