use std::fmt;

use super::token::ParamType;

/// Failure to encode call input or decode call output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    /// Byte length does not match the layout implied by the types.
    InvalidLength { expected: usize, got: usize },
    /// Call input starts with a different method selector.
    SelectorMismatch { expected: [u8; 4], got: Vec<u8> },
    /// Wrong number of values for the method signature.
    ArgumentCount { expected: usize, got: usize },
    /// A value's type does not match the signature.
    TypeMismatch {
        index: usize,
        expected: ParamType,
        got: ParamType,
    },
    /// A `bool` word holding something other than 0 or 1.
    InvalidBool { index: usize },
    /// An `address` word with non-zero high bytes.
    InvalidAddress { index: usize },
    /// A tail offset or length pointing outside the data.
    InvalidOffset { index: usize },
    /// A `string` tail that is not UTF-8.
    InvalidUtf8 { index: usize },
}

impl fmt::Display for AbiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiError::InvalidLength { expected, got } => write!(
                f,
                "invalid ABI data length: expected {} bytes, got {}",
                expected, got
            ),
            AbiError::SelectorMismatch { expected, got } => write!(
                f,
                "selector mismatch: expected 0x{}, got 0x{}",
                hex::encode(expected),
                hex::encode(got)
            ),
            AbiError::ArgumentCount { expected, got } => {
                write!(f, "expected {} values, got {}", expected, got)
            }
            AbiError::TypeMismatch {
                index,
                expected,
                got,
            } => write!(
                f,
                "value {} has type {}, signature expects {}",
                index, got, expected
            ),
            AbiError::InvalidBool { index } => write!(f, "value {} is not a valid bool", index),
            AbiError::InvalidAddress { index } => {
                write!(f, "value {} is not a valid address word", index)
            }
            AbiError::InvalidOffset { index } => {
                write!(f, "value {} has an out-of-range offset", index)
            }
            AbiError::InvalidUtf8 { index } => write!(f, "value {} is not valid UTF-8", index),
        }
    }
}

impl std::error::Error for AbiError {}
