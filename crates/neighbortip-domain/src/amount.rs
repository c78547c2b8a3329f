//! Ether amounts and their wei representation

use crate::error::DomainError;
use std::fmt;
use std::str::FromStr;

/// Decimal places between ether and wei
pub const ETHER_DECIMALS: usize = 18;

/// Tip amount used when nothing else is configured
pub const DEFAULT_TIP_AMOUNT: &str = "0.0000001";

const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// An amount in wei
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wei(u128);

impl Wei {
    /// Wrap a raw wei value
    pub fn from_wei(value: u128) -> Self {
        Self(value)
    }

    /// Parse a decimal ether string such as `"0.0000001"` or `"2"`
    ///
    /// # Examples
    ///
    /// ```
    /// use neighbortip_domain::Wei;
    ///
    /// assert_eq!(Wei::parse_ether("0.0000001").unwrap().value(), 100_000_000_000);
    /// assert_eq!(Wei::parse_ether("1").unwrap().value(), 1_000_000_000_000_000_000);
    /// assert!(Wei::parse_ether("1e5").is_err());
    /// ```
    pub fn parse_ether(input: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidAmount {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (trimmed, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("empty amount"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a decimal number"));
        }
        if fraction.len() > ETHER_DECIMALS {
            return Err(invalid("too many decimal places"));
        }

        let whole_wei = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u128>()
                .ok()
                .and_then(|w| w.checked_mul(WEI_PER_ETHER))
                .ok_or_else(|| invalid("amount too large"))?
        };

        let fraction_wei = if fraction.is_empty() {
            0
        } else {
            let padded = format!("{:0<width$}", fraction, width = ETHER_DECIMALS);
            padded.parse::<u128>().map_err(|_| invalid("expected a decimal number"))?
        };

        whole_wei
            .checked_add(fraction_wei)
            .map(Self)
            .ok_or_else(|| invalid("amount too large"))
    }

    /// Raw wei value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// `0x`-prefixed hex quantity for JSON-RPC
    pub fn to_hex(&self) -> String {
        format!("{:#x}", self.0)
    }

    /// Decimal ether string without trailing zeros
    pub fn format_ether(&self) -> String {
        let whole = self.0 / WEI_PER_ETHER;
        let fraction = self.0 % WEI_PER_ETHER;
        if fraction == 0 {
            return whole.to_string();
        }
        let digits = format!("{:0>width$}", fraction, width = ETHER_DECIMALS);
        format!("{}.{}", whole, digits.trim_end_matches('0'))
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ETH", self.format_ether())
    }
}

impl FromStr for Wei {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_ether(s)
    }
}
