//! Neighbortip Rust SDK
//!
//! Client library for finding neighboring FIDs through the Directory Proxy
//! and tipping them from a connected wallet.
//!
//! # Example
//!
//! ```no_run
//! use neighbortip_sdk::{DirectoryClient, SweepController};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let directory = DirectoryClient::new("http://localhost:3000")?;
//! let mut controller = SweepController::new(directory);
//!
//! let state = controller.submit("822727").await?;
//! for neighbor in &state.neighbors {
//!     println!("{} -> {}", neighbor.fid, neighbor.owner);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;
pub mod sweep;
pub mod tip;
pub mod wallet;

pub use client::{DirectoryClient, DirectoryLookup, DEFAULT_TIMEOUT_SECS};
pub use error::SdkError;
pub use sweep::{SweepController, SweepState};
pub use tip::{TipAction, TipOutcome, TipRequest};
pub use wallet::{Connector, RpcWallet, Wallet, WalletError, WalletStatus};
