//! Fid module - directory identifiers

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of an entry in the social directory
///
/// User input is always checked to be positive. Values read back from the
/// directory are taken as they come.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fid(u64);

impl Fid {
    /// Create a Fid, rejecting zero
    ///
    /// # Examples
    ///
    /// ```
    /// use neighbortip_domain::Fid;
    ///
    /// assert!(Fid::new(822727).is_some());
    /// assert!(Fid::new(0).is_none());
    /// ```
    pub fn new(value: u64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    /// Wrap a raw value without checks (directory payloads)
    pub fn from_value(value: u64) -> Self {
        Self(value)
    }

    /// Parse raw user input
    ///
    /// Surrounding whitespace is ignored. Anything other than a positive
    /// base-10 integer is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use neighbortip_domain::{DomainError, Fid};
    ///
    /// assert_eq!(Fid::parse(" 42 ").unwrap().value(), 42);
    /// assert_eq!(Fid::parse("   "), Err(DomainError::EmptyFid));
    /// assert!(Fid::parse("-3").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyFid);
        }

        trimmed
            .parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| DomainError::InvalidFid(trimmed.to_string()))
    }

    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Fid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Fid {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
