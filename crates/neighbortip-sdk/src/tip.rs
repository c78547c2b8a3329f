//! Confirm-then-send tips to neighbors.

use crate::wallet::Wallet;
use neighbortip_domain::{Neighbor, Wei};
use tracing::{error, info};

/// A tip waiting for the user's confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipRequest {
    /// Recipient
    pub neighbor: Neighbor,
    /// Amount to send
    pub amount: Wei,
}

impl TipRequest {
    /// Confirmation question shown to the user
    pub fn prompt(&self) -> String {
        format!(
            "Send {} ETH to FID {}?",
            self.amount.format_ether(),
            self.neighbor.fid
        )
    }
}

/// Result of a confirmed tip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TipOutcome {
    /// Transaction accepted by the wallet
    Sent {
        /// Transaction hash
        tx_hash: String,
    },
    /// The wallet rejected or failed the transaction
    Failed(String),
}

/// The two-step tip gesture: request, then confirm or cancel
#[derive(Debug, Default)]
pub struct TipAction {
    pending: Option<TipRequest>,
}

impl TipAction {
    /// Create an idle tip action
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tip; replaces any tip already awaiting confirmation
    pub fn request(&mut self, neighbor: Neighbor, amount: Wei) -> &TipRequest {
        self.pending.insert(TipRequest { neighbor, amount })
    }

    /// Tip awaiting confirmation
    pub fn pending(&self) -> Option<&TipRequest> {
        self.pending.as_ref()
    }

    /// Drop the pending tip
    pub fn cancel(&mut self) -> Option<TipRequest> {
        self.pending.take()
    }

    /// Send the pending tip through `wallet`
    ///
    /// Returns `None` when nothing is pending. The wallet is called once;
    /// a failure is recorded, not retried.
    pub async fn confirm<W: Wallet + ?Sized>(&mut self, wallet: &W) -> Option<TipOutcome> {
        let request = self.pending.take()?;

        let outcome = match wallet
            .send_transaction(&request.neighbor.owner, request.amount)
            .await
        {
            Ok(tx_hash) => {
                info!("Tip to FID {} sent: {}", request.neighbor.fid, tx_hash);
                TipOutcome::Sent { tx_hash }
            }
            Err(e) => {
                error!("Transaction failed: {}", e);
                TipOutcome::Failed(e.to_string())
            }
        };

        Some(outcome)
    }
}
