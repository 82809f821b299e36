//! # Value Types
//!
//! Small newtypes for the values a wallet hands back: account addresses,
//! chain ids and native balances. They parse the loosely-typed strings that
//! cross the EIP-1193 boundary once, so the rest of the crate never handles
//! raw hex.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Failure to parse a value reported by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid address: {0}")]
    Address(String),
    #[error("Invalid chain id: {0}")]
    ChainId(String),
    #[error("Invalid quantity: {0}")]
    Quantity(String),
}

/// A 20-byte account address, `0x` followed by 40 hex digits.
///
/// The casing the wallet reported is kept for display (it may be an EIP-55
/// checksum); equality ignores case.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| ParseError::Address(s.to_string()))?;

        if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseError::Address(s.to_string()));
        }

        Ok(Self(format!("0x{}", digits)))
    }
}

impl TryFrom<String> for Address {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an EVM chain (1 = Ethereum Mainnet, 11155111 = Sepolia).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
    /// Parse the `0x`-prefixed quantity wallets use in `eth_chainId` and `chainChanged`.
    pub fn from_hex(value: &str) -> Result<Self, ParseError> {
        let digits = value
            .trim()
            .strip_prefix("0x")
            .or_else(|| value.trim().strip_prefix("0X"))
            .ok_or_else(|| ParseError::ChainId(value.to_string()))?;

        match u64::from_str_radix(digits, 16) {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(ParseError::ChainId(value.to_string())),
        }
    }

    /// Encode as the lowercase hex quantity wallet methods expect.
    pub fn to_hex(self) -> String {
        format!("0x{:x}", self.0)
    }
}

impl FromStr for ChainId {
    type Err = ParseError;

    /// Accepts both hex (`0xaa36a7`) and decimal (`11155111`) forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
            return Self::from_hex(trimmed);
        }
        match trimmed.parse::<u64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(ParseError::ChainId(s.to_string())),
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Native balance in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Wei(pub u128);

impl Wei {
    /// Parse the hex quantity returned by `eth_getBalance`.
    pub fn from_hex(value: &str) -> Result<Self, ParseError> {
        let digits = value
            .strip_prefix("0x")
            .ok_or_else(|| ParseError::Quantity(value.to_string()))?;
        if digits.is_empty() {
            return Err(ParseError::Quantity(value.to_string()));
        }
        u128::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| ParseError::Quantity(value.to_string()))
    }

    /// Whole-unit decimal string, e.g. `"1.5"`.
    pub fn to_ether_string(self) -> String {
        shared::utils::format_ether(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parse_keeps_casing() {
        let address: Address = "0x52908400098527886E0F7030069857D2E4169EE7".parse().unwrap();
        assert_eq!(address.as_str(), "0x52908400098527886E0F7030069857D2E4169EE7");
    }

    #[test]
    fn test_address_equality_ignores_case() {
        let upper: Address = "0x52908400098527886E0F7030069857D2E4169EE7".parse().unwrap();
        let lower: Address = "0x52908400098527886e0f7030069857d2e4169ee7".parse().unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_address_rejects_bad_input() {
        assert!("52908400098527886E0F7030069857D2E4169EE7".parse::<Address>().is_err());
        assert!("0x1234".parse::<Address>().is_err());
        assert!("0xZZ908400098527886E0F7030069857D2E4169EE7".parse::<Address>().is_err());
    }

    #[test]
    fn test_chain_id_hex_round_trip() {
        let sepolia = ChainId::from_hex("0xaa36a7").unwrap();
        assert_eq!(sepolia, ChainId(11155111));
        assert_eq!(sepolia.to_hex(), "0xaa36a7");
        assert_eq!(ChainId(1).to_hex(), "0x1");
    }

    #[test]
    fn test_chain_id_rejects_zero_and_garbage() {
        assert!(ChainId::from_hex("0x0").is_err());
        assert!(ChainId::from_hex("aa36a7").is_err());
        assert!(ChainId::from_hex("0xnope").is_err());
        assert!("0".parse::<ChainId>().is_err());
    }

    #[test]
    fn test_chain_id_from_str_accepts_decimal() {
        assert_eq!("137".parse::<ChainId>().unwrap(), ChainId(137));
        assert_eq!("0x89".parse::<ChainId>().unwrap(), ChainId(137));
    }

    #[test]
    fn test_wei_from_hex() {
        assert_eq!(Wei::from_hex("0x0").unwrap(), Wei(0));
        assert_eq!(Wei::from_hex("0xde0b6b3a7640000").unwrap(), Wei(1_000_000_000_000_000_000));
        assert!(Wei::from_hex("0x").is_err());
        assert!(Wei::from_hex("1000").is_err());
        assert_eq!(Wei(1_500_000_000_000_000_000).to_ether_string(), "1.5");
    }
}
