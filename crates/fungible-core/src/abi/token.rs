//! ABI parameter types and values.

use std::fmt;

use fungible_admin_types::{ChainAddress, U256};

/// Parameter type of a contract method input or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Uint,
    Address,
    Bool,
    String,
}

impl ParamType {
    /// Whether values of this type live in the tail section.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ParamType::String)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamType::Uint => "uint256",
            ParamType::Address => "address",
            ParamType::Bool => "bool",
            ParamType::String => "string",
        };
        f.write_str(s)
    }
}

/// A typed ABI value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Uint(U256),
    Address(ChainAddress),
    Bool(bool),
    String(String),
}

impl Token {
    pub fn param_type(&self) -> ParamType {
        match self {
            Token::Uint(_) => ParamType::Uint,
            Token::Address(_) => ParamType::Address,
            Token::Bool(_) => ParamType::Bool,
            Token::String(_) => ParamType::String,
        }
    }

    pub fn into_uint(self) -> Option<U256> {
        match self {
            Token::Uint(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_address(self) -> Option<ChainAddress> {
        match self {
            Token::Address(a) => Some(a),
            _ => None,
        }
    }

    pub fn into_bool(self) -> Option<bool> {
        match self {
            Token::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            Token::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<U256> for Token {
    fn from(value: U256) -> Self {
        Token::Uint(value)
    }
}

impl From<u64> for Token {
    fn from(value: u64) -> Self {
        Token::Uint(U256::from(value))
    }
}

impl From<ChainAddress> for Token {
    fn from(value: ChainAddress) -> Self {
        Token::Address(value)
    }
}

impl From<bool> for Token {
    fn from(value: bool) -> Self {
        Token::Bool(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::String(value.to_string())
    }
}
