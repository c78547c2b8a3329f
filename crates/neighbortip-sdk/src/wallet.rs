//! Wallet access over Ethereum JSON-RPC.
//!
//! A [`Connector`] names an RPC endpoint that holds the user's account
//! (a local node, a signer daemon, a browser-extension bridge). The
//! [`Wallet`] trait is what the rest of the SDK talks to, and
//! [`RpcWallet`] implements it with plain JSON-RPC 2.0 calls.

use async_trait::async_trait;
use neighbortip_domain::{truncate_address, Wei};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Message signed by the `sign` command when none is given
pub const DEFAULT_SIGN_MESSAGE: &str = "Tip ur Neighbor";

/// JSON-RPC "method not found"
const METHOD_NOT_FOUND: i64 = -32601;

/// Wallet operation errors
#[derive(Debug, Error)]
pub enum WalletError {
    /// No account is connected
    #[error("Wallet not connected - connect a wallet first")]
    NotConnected,

    /// The endpoint exposes no accounts
    #[error("No accounts available from connector '{0}'")]
    NoAccounts(String),

    /// The endpoint returned a JSON-RPC error object
    #[error("{message} (code {code})")]
    Rpc {
        /// JSON-RPC error code
        code: i64,
        /// Error message from the endpoint
        message: String,
    },

    /// The endpoint could not be reached
    #[error("Wallet transport error: {0}")]
    Transport(String),

    /// The endpoint answered with something unexpected
    #[error("Invalid wallet response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for WalletError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            WalletError::InvalidResponse(e.to_string())
        } else {
            WalletError::Transport(e.to_string())
        }
    }
}

/// A named wallet endpoint the user can connect to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    /// Display name (e.g., "local", "frame")
    pub name: String,
    /// JSON-RPC endpoint
    pub rpc_url: String,
}

/// Connection state of a wallet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WalletStatus {
    /// Nothing connected
    #[default]
    Disconnected,
    /// Connection in progress
    Connecting,
    /// Connected to an account
    Connected {
        /// Active account address
        address: String,
        /// Chain the endpoint is on
        chain_id: u64,
    },
    /// Last connection attempt failed
    Error(String),
}

impl WalletStatus {
    /// Address of the connected account
    pub fn address(&self) -> Option<&str> {
        match self {
            WalletStatus::Connected { address, .. } => Some(address),
            _ => None,
        }
    }

    /// Whether an account is connected
    pub fn is_connected(&self) -> bool {
        matches!(self, WalletStatus::Connected { .. })
    }
}

impl fmt::Display for WalletStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletStatus::Disconnected => write!(f, "Not connected"),
            WalletStatus::Connecting => write!(f, "Connecting..."),
            WalletStatus::Connected { address, chain_id } => write!(
                f,
                "Connected as {} (Chain ID: {})",
                truncate_address(address),
                chain_id
            ),
            WalletStatus::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

/// Operations the application needs from a wallet
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Connect to the first account the wallet exposes
    async fn connect(&mut self) -> Result<(), WalletError>;

    /// Forget the connected account
    async fn disconnect(&mut self);

    /// Current connection state
    fn status(&self) -> &WalletStatus;

    /// Sign free text with the connected account, returning the signature
    async fn sign_message(&self, message: &str) -> Result<String, WalletError>;

    /// Send `value` to `to`, returning the transaction hash
    async fn send_transaction(&self, to: &str, value: Wei) -> Result<String, WalletError>;
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Wallet backed by an Ethereum JSON-RPC endpoint
pub struct RpcWallet {
    connector: Connector,
    http_client: reqwest::Client,
    status: WalletStatus,
    next_id: AtomicU64,
}

impl RpcWallet {
    /// Create a disconnected wallet for `connector`
    ///
    /// No client timeout is set; signers may wait on the user.
    pub fn new(connector: Connector) -> Self {
        Self {
            connector,
            http_client: reqwest::Client::new(),
            status: WalletStatus::Disconnected,
            next_id: AtomicU64::new(1),
        }
    }

    /// Connector this wallet talks to
    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        debug!("JSON-RPC {} -> {}", method, self.connector.rpc_url);

        let response: RpcResponse = self
            .http_client
            .post(&self.connector.rpc_url)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(WalletError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response
            .result
            .ok_or_else(|| WalletError::InvalidResponse(format!("{} returned no result", method)))
    }

    async fn accounts(&self) -> Result<Vec<String>, WalletError> {
        let result = match self.call("eth_requestAccounts", json!([])).await {
            Err(WalletError::Rpc { code, .. }) if code == METHOD_NOT_FOUND => {
                debug!("eth_requestAccounts unsupported, falling back to eth_accounts");
                self.call("eth_accounts", json!([])).await?
            }
            other => other?,
        };

        serde_json::from_value(result)
            .map_err(|e| WalletError::InvalidResponse(format!("accounts: {}", e)))
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        let result = self.call("eth_chainId", json!([])).await?;
        let hex_id = result
            .as_str()
            .ok_or_else(|| WalletError::InvalidResponse("eth_chainId is not a string".into()))?;
        parse_quantity(hex_id)
    }

    async fn establish(&self) -> Result<WalletStatus, WalletError> {
        let accounts = self.accounts().await?;
        let address = accounts
            .into_iter()
            .next()
            .ok_or_else(|| WalletError::NoAccounts(self.connector.name.clone()))?;
        let chain_id = self.chain_id().await?;
        Ok(WalletStatus::Connected { address, chain_id })
    }

    fn connected_address(&self) -> Result<&str, WalletError> {
        self.status.address().ok_or(WalletError::NotConnected)
    }
}

#[async_trait]
impl Wallet for RpcWallet {
    async fn connect(&mut self) -> Result<(), WalletError> {
        self.status = WalletStatus::Connecting;
        info!("Connecting to wallet '{}'", self.connector.name);

        match self.establish().await {
            Ok(status) => {
                info!("Wallet {}", status);
                self.status = status;
                Ok(())
            }
            Err(e) => {
                warn!("Wallet connection failed: {}", e);
                self.status = WalletStatus::Error(e.to_string());
                Err(e)
            }
        }
    }

    async fn disconnect(&mut self) {
        info!("Disconnecting wallet '{}'", self.connector.name);
        self.status = WalletStatus::Disconnected;
    }

    fn status(&self) -> &WalletStatus {
        &self.status
    }

    async fn sign_message(&self, message: &str) -> Result<String, WalletError> {
        let address = self.connected_address()?;
        let payload = format!("0x{}", hex::encode(message.as_bytes()));

        let result = self.call("personal_sign", json!([payload, address])).await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| WalletError::InvalidResponse("signature is not a string".into()))
    }

    async fn send_transaction(&self, to: &str, value: Wei) -> Result<String, WalletError> {
        let from = self.connected_address()?;
        info!("Attempting to send {} to {}", value, to);

        let transaction = json!({
            "from": from,
            "to": to,
            "value": value.to_hex(),
        });
        let result = self.call("eth_sendTransaction", json!([transaction])).await?;
        let hash = result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| WalletError::InvalidResponse("transaction hash is not a string".into()))?;

        info!("Transaction submitted: {}", hash);
        Ok(hash)
    }
}

/// Parse a `0x`-prefixed JSON-RPC quantity
fn parse_quantity(value: &str) -> Result<u64, WalletError> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| WalletError::InvalidResponse(format!("not a hex quantity: {}", value)))?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| WalletError::InvalidResponse(format!("bad quantity {}: {}", value, e)))
}
