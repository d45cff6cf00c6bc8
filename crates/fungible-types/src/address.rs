//! Contract address parsing and formatting.
//!
//! Wrapped-asset contracts live at 20-byte addresses. The accepted textual
//! form is exactly 40 hex digits with an optional `0x`/`0X` prefix; case is
//! ignored. Unlike account ids, addresses are never padded or truncated:
//! `"0x2"` is malformed here.
//!
//! ```
//! use fungible_admin_types::address::ChainAddress;
//!
//! let addr: ChainAddress = "0x5F0b1a82749cb4E2278EC87F8BF6B618dC71a8bf".parse().unwrap();
//! assert_eq!(addr.to_string(), "0x5f0b1a82749cb4e2278ec87f8bf6b618dc71a8bf");
//! assert!(ChainAddress::parse("invalid_address").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use primitive_types::H160;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Length of a contract address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

const HEX_LENGTH: usize = ADDRESS_LENGTH * 2;

/// Why an address string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressParseError {
    /// The input was empty (or only a prefix).
    Empty,
    /// The hex body did not have exactly 40 digits.
    InvalidLength { got: usize },
    /// The hex body contained a non-hex character.
    InvalidHex(String),
}

impl fmt::Display for AddressParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressParseError::Empty => write!(f, "empty address"),
            AddressParseError::InvalidLength { got } => write!(
                f,
                "expected {} hex digits, got {}",
                HEX_LENGTH, got
            ),
            AddressParseError::InvalidHex(reason) => write!(f, "invalid hex: {}", reason),
        }
    }
}

impl std::error::Error for AddressParseError {}

/// A 20-byte on-chain contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ChainAddress(H160);

impl ChainAddress {
    /// The all-zero address.
    pub const ZERO: ChainAddress = ChainAddress(H160([0u8; ADDRESS_LENGTH]));

    /// Parse the textual form of an address.
    pub fn parse(input: &str) -> Result<Self, AddressParseError> {
        let body = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);
        if body.is_empty() {
            return Err(AddressParseError::Empty);
        }
        if body.len() != HEX_LENGTH {
            return Err(AddressParseError::InvalidLength { got: body.len() });
        }
        let bytes = hex::decode(body).map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        Ok(Self(H160::from_slice(&bytes)))
    }

    /// Build an address from raw bytes.
    pub fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(H160(bytes))
    }

    /// Build an address whose low 8 bytes hold `value` (big-endian).
    ///
    /// Handy for well-known module accounts and test fixtures.
    pub fn from_low_u64(value: u64) -> Self {
        Self(H160::from_low_u64_be(value))
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        self.0.as_fixed_bytes()
    }

    /// The underlying `H160`.
    pub fn as_h160(&self) -> &H160 {
        &self.0
    }

    /// Check whether this is the zero address.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<H160> for ChainAddress {
    fn from(value: H160) -> Self {
        Self(value)
    }
}

impl From<ChainAddress> for H160 {
    fn from(value: ChainAddress) -> Self {
        value.0
    }
}

impl FromStr for ChainAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.as_bytes()))
    }
}

impl Serialize for ChainAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ChainAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ChainAddress::parse(&s).map_err(serde::de::Error::custom)
    }
}
