//! `admin` subcommand: manage the fungible admin policy.

use anyhow::Result;
use clap::{Args, Subcommand};
use fungible_admin_types::AccountId;

use super::output::print_json;
use super::AdminState;

#[derive(Args)]
pub struct AdminCmd {
    #[command(subcommand)]
    action: AdminAction,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Set the account allowed to update fees
    Set {
        /// Account id of the new admin
        account: AccountId,
    },
    /// Remove the admin; every fee update is then rejected
    Clear,
    /// Show the configured admin
    Show,
}

impl AdminCmd {
    pub fn execute(self, state: &mut AdminState, json: bool) -> Result<()> {
        match self.action {
            AdminAction::Set { account } => {
                state.keeper.set_admin(&account);
                state.mark_dirty();
                if json {
                    print_json(&serde_json::json!({ "admin": account }))?;
                } else {
                    println!("Admin set to {}", account);
                }
            }
            AdminAction::Clear => {
                state.keeper.remove_admin();
                state.mark_dirty();
                if json {
                    print_json(&serde_json::json!({ "admin": null }))?;
                } else {
                    println!("Admin cleared");
                }
            }
            AdminAction::Show => {
                let admin = state.keeper.admin();
                if json {
                    print_json(&serde_json::json!({ "admin": admin }))?;
                } else {
                    match admin {
                        Some(admin) => println!("Admin: {}", admin),
                        None => println!("Admin: not configured"),
                    }
                }
            }
        }
        Ok(())
    }
}
