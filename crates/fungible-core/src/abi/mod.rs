//! Contract ABI codec.
//!
//! Calls into wrapped-asset contracts use the Ethereum contract ABI: a 4-byte
//! method selector (the first bytes of Keccak-256 over the canonical
//! signature) followed by 32-byte big-endian argument words. Outputs are the
//! same word layout without a selector.
//!
//! Everything here is pure: no I/O, no state, identical input always gives
//! identical output.
//!
//! ## Supported Types
//!
//! | Type | Head | Tail |
//! |------|------|------|
//! | `uint256` | value, big-endian | - |
//! | `address` | 12 zero bytes + 20 address bytes | - |
//! | `bool` | 0 or 1 | - |
//! | `string` | offset of tail | length word + UTF-8 bytes, zero padded |

mod codec;
mod error;
mod function;
mod token;
pub mod wrapped_asset;

pub use codec::{decode, encode, WORD_SIZE};
pub use error::AbiError;
pub use function::{Function, Selector};
pub use token::{ParamType, Token};
