//! CLI subcommand implementations for fungible-admin

pub mod admin;
pub mod deploy;
pub mod fee;
pub mod flags;
pub mod output;
pub mod state;

pub use state::AdminState;
