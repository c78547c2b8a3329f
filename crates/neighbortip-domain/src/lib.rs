//! Neighbortip Domain Layer
//!
//! Value types shared by the proxy, the SDK and the CLI. Nothing in here
//! performs I/O.
//!
//! ## Key Concepts
//!
//! - **Fid**: numeric identifier naming an entry in the social directory
//! - **UserProof**: a directory record binding a FID to an owner address
//! - **Neighbor**: the reduced projection of the first proof for a FID
//! - **SweepWindow**: the candidate FIDs surrounding a center value
//! - **Wei**: tip amounts, parsed from decimal ether strings

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod amount;
pub mod error;
pub mod fid;
pub mod proof;
pub mod window;

// Re-exports for convenience
pub use address::truncate_address;
pub use amount::{Wei, DEFAULT_TIP_AMOUNT};
pub use error::DomainError;
pub use fid::Fid;
pub use proof::{Neighbor, ProofResponse, UserProof};
pub use window::{SweepWindow, SWEEP_RADIUS, SWEEP_WIDTH};
