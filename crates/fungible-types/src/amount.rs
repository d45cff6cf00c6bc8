//! 256-bit unsigned magnitudes (fees, liquidity caps).
//!
//! Values are parsed from decimal or `0x`-prefixed hex text. Anything that
//! does not fit in 256 bits is rejected rather than wrapped.

use std::fmt;

pub use primitive_types::U256;

/// Why an amount string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    Empty,
    InvalidDigit(String),
    Overflow,
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::Empty => write!(f, "empty amount"),
            AmountParseError::InvalidDigit(s) => write!(f, "invalid amount: {}", s),
            AmountParseError::Overflow => write!(f, "amount does not fit in 256 bits"),
        }
    }
}

impl std::error::Error for AmountParseError {}

/// Parse a non-negative integer from decimal or `0x` hex.
pub fn parse_u256(input: &str) -> Result<U256, AmountParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AmountParseError::Empty);
    }

    if let Some(hex_body) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        if hex_body.is_empty() {
            return Err(AmountParseError::Empty);
        }
        if !hex_body.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AmountParseError::InvalidDigit(input.to_string()));
        }
        let significant = hex_body.trim_start_matches('0');
        if significant.len() > 64 {
            return Err(AmountParseError::Overflow);
        }
        if significant.is_empty() {
            return Ok(U256::zero());
        }
        return U256::from_str_radix(significant, 16)
            .map_err(|_| AmountParseError::InvalidDigit(input.to_string()));
    }

    if !input.chars().all(|c| c.is_ascii_digit()) {
        return Err(AmountParseError::InvalidDigit(input.to_string()));
    }
    U256::from_dec_str(input).map_err(|_| AmountParseError::Overflow)
}

/// Serde adapter storing a `U256` as a decimal string.
///
/// Use with `#[serde(with = "fungible_admin_types::amount::u256_decimal")]`.
pub mod u256_decimal {
    use super::{parse_u256, U256};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_u256(&s).map_err(serde::de::Error::custom)
    }
}
