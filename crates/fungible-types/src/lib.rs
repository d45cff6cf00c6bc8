//! Shared types for the fungible-admin workspace.
//!
//! This crate holds the value types that every other crate in the workspace
//! passes around, so that the core engine and the CLI agree on one
//! representation:
//!
//! - [`ChainAddress`](address::ChainAddress) - 20-byte contract address
//! - [`AccountId`](account::AccountId) - opaque ledger account identifier
//! - [`ForeignCoin`](foreign_coin::ForeignCoin) - registered wrapped-asset record
//! - [`PermissionFlags`](flags::PermissionFlags) - inbound/outbound switches
//! - [`U256`] - fee and cap magnitudes

pub mod account;
pub mod address;
pub mod amount;
pub mod env_utils;
pub mod flags;
pub mod foreign_coin;

// Re-export commonly used types at crate root
pub use account::{AccountId, AccountIdError};
pub use address::{AddressParseError, ChainAddress, ADDRESS_LENGTH};
pub use amount::{parse_u256, AmountParseError, U256};
pub use flags::PermissionFlags;
pub use foreign_coin::{CoinType, ForeignCoin};
