//! fungible-admin: administer wrapped foreign-asset contracts locally
//!
//! Keeps a local ledger (registry, admin policy, permission flags and the
//! wrapped-asset contracts' storage) in a JSON state file and runs the
//! fungible module's operations against it.
//!
//! ## Example Usage
//!
//! ```bash
//! # Start a session with an admin
//! fungible-admin init --admin zeta1admin
//!
//! # Onboard a gas coin
//! fungible-admin deploy --contract 0x5f0b1a82749cb4e2278ec87f8bf6b618dc71a8bf \
//!     --symbol ETH --name Ether --chain-id 5
//!
//! # Change its protocol flat fee
//! fungible-admin update-fee --caller zeta1admin \
//!     --contract 0x5f0b1a82749cb4e2278ec87f8bf6b618dc71a8bf --fee 42
//!
//! # Read it back
//! fungible-admin query-fee --contract 0x5f0b1a82749cb4e2278ec87f8bf6b618dc71a8bf
//! ```

use std::path::Path;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use fungible_admin_core::FungibleConfig;
use fungible_admin_types::AccountId;

mod admin_cli;

use admin_cli::{
    admin::AdminCmd,
    deploy::{list_coins, DeployCmd},
    fee::{QueryFeeCmd, UpdateFeeCmd},
    flags::FlagsCmd,
    output::print_json,
    state::default_state_file,
    AdminState,
};

#[derive(Parser)]
#[command(
    name = "fungible-admin",
    author,
    version,
    about = "Administer wrapped foreign-asset contracts and their protocol fees"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// State file for session persistence (default: $FUNGIBLE_ADMIN_STATE
    /// or ~/.fungible-admin/state.json)
    #[arg(long, global = true)]
    state_file: Option<std::path::PathBuf>,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a fresh session state file
    Init {
        /// Admin account to configure
        #[arg(long)]
        admin: Option<AccountId>,

        /// Overwrite an existing state file
        #[arg(long)]
        force: bool,
    },

    /// Manage the fungible admin
    Admin(AdminCmd),

    /// Deploy and register a wrapped-asset contract
    Deploy(DeployCmd),

    /// List registered foreign coins
    Coins,

    /// Read the protocol flat fee of a contract
    QueryFee(QueryFeeCmd),

    /// Update the protocol flat fee of a registered coin (admin only)
    UpdateFee(UpdateFeeCmd),

    /// Inspect or change the observer permission flags
    Flags(FlagsCmd),
}

fn main() -> Result<()> {
    let Cli {
        command,
        state_file,
        json,
    } = Cli::parse();
    let config = FungibleConfig::from_env()?;
    let state_file = state_file
        .or_else(|| config.state_file.clone())
        .unwrap_or_else(default_state_file);

    match command {
        Commands::Init { admin, force } => init(&state_file, config, admin, force, json),
        command => run(command, &state_file, config, json),
    }
}

fn init(
    state_file: &Path,
    config: FungibleConfig,
    admin: Option<AccountId>,
    force: bool,
    json: bool,
) -> Result<()> {
    if state_file.exists() && !force {
        bail!(
            "State file {} already exists (use --force to overwrite)",
            state_file.display()
        );
    }
    let mut state = AdminState::new(config);
    if let Some(admin) = &admin {
        state.keeper.set_admin(admin);
    }
    state.mark_dirty();
    state.save(state_file)?;

    if json {
        print_json(&serde_json::json!({
            "state_file": state_file,
            "admin": admin,
        }))?;
    } else {
        println!("Initialized session state at {}", state_file.display());
    }
    Ok(())
}

fn run(command: Commands, state_file: &Path, config: FungibleConfig, json: bool) -> Result<()> {
    // Load or create session state
    let mut state = AdminState::load_or_create(state_file, config)?;

    let result = match command {
        Commands::Init { .. } => bail!("init does not run against an existing session"),
        Commands::Admin(cmd) => cmd.execute(&mut state, json),
        Commands::Deploy(cmd) => cmd.execute(&mut state, json),
        Commands::Coins => list_coins(&state, json),
        Commands::QueryFee(cmd) => cmd.execute(&mut state, json),
        Commands::UpdateFee(cmd) => cmd.execute(&mut state, json),
        Commands::Flags(cmd) => cmd.execute(&mut state, json),
    };

    // Save state on success
    if result.is_ok() {
        state.save(state_file)?;
    }

    result
}
