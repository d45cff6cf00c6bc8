#![allow(unused_imports)]
#![allow(dead_code)]
//! Shared helpers for the core integration tests.
//!
//! # Modules
//!
//! - `fixtures`: accounts, coins and ready-made keepers
//! - `mocks`: scripted VM gateway and counting registry
//! - `assertions`: error-kind and state assertions

pub mod assertions;
pub mod fixtures;
pub mod mocks;

pub use assertions::{assert_error_contains, assert_kind, assert_state_unchanged};
pub use fixtures::{
    admin, eth_coin, fee_request, local_keeper, outsider, scripted_keeper, ScriptedKeeper,
    UNREGISTERED_ADDRESS,
};
pub use mocks::{CountingRegistry, Script, ScriptedGateway};
