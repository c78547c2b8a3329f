//! Validation errors for user-supplied values.

use thiserror::Error;

/// Errors raised while parsing user input into domain values
///
/// The display strings are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Nothing was entered
    #[error("Please enter a FID")]
    EmptyFid,

    /// Input was not a positive integer
    #[error("Please enter a valid FID (positive number)")]
    InvalidFid(String),

    /// Ether amount could not be converted to wei
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount {
        /// Raw input
        input: String,
        /// What was wrong with it
        reason: String,
    },
}
