//! `flags` subcommand: observer permission flags.

use anyhow::Result;
use clap::{Args, Subcommand};
use fungible_admin_types::PermissionFlags;

use super::output::{format_flags, print_json};
use super::AdminState;

#[derive(Args)]
pub struct FlagsCmd {
    #[command(subcommand)]
    action: FlagsAction,
}

#[derive(Subcommand)]
enum FlagsAction {
    /// Show the current flags
    Show,
    /// Overwrite both flags
    Set {
        #[arg(long, action = clap::ArgAction::Set)]
        inbound: bool,
        #[arg(long, action = clap::ArgAction::Set)]
        outbound: bool,
    },
    /// Disable inbound, keep outbound as is
    DisableInbound,
    /// Remove the flags record
    Clear,
}

impl FlagsCmd {
    pub fn execute(self, state: &mut AdminState, json: bool) -> Result<()> {
        let flags = match self.action {
            FlagsAction::Show => state.keeper.permission_flags()?,
            FlagsAction::Set { inbound, outbound } => {
                let flags = PermissionFlags::new(inbound, outbound);
                state.keeper.set_permission_flags(flags)?;
                state.mark_dirty();
                Some(flags)
            }
            FlagsAction::DisableInbound => {
                let flags = state.keeper.disable_inbound_only()?;
                state.mark_dirty();
                Some(flags)
            }
            FlagsAction::Clear => {
                state.keeper.remove_permission_flags();
                state.mark_dirty();
                None
            }
        };

        if json {
            print_json(&serde_json::json!({
                "flags": flags,
                "inbound_enabled": flags.is_some_and(|f| f.is_inbound_enabled),
                "outbound_allowed": flags.is_some_and(|f| f.is_outbound_enabled),
            }))?;
        } else {
            println!("{}", format_flags(flags));
        }
        Ok(())
    }
}
