//! `query-fee` and `update-fee` subcommands.

use anyhow::{Context, Result};
use clap::Args;
use fungible_admin_core::FeeUpdateRequest;
use fungible_admin_types::{parse_u256, AccountId, ChainAddress, U256};

use super::output::{format_event, print_json};
use super::AdminState;

#[derive(Args)]
pub struct QueryFeeCmd {
    /// Wrapped-asset contract address
    #[arg(long)]
    contract: ChainAddress,
}

impl QueryFeeCmd {
    pub fn execute(self, state: &mut AdminState, json: bool) -> Result<()> {
        let ctx = state.read_context();
        let fee = state
            .keeper
            .query_protocol_flat_fee(&ctx, &self.contract)
            .with_context(|| format!("Failed to query protocol flat fee of {}", self.contract))?;

        if json {
            print_json(&serde_json::json!({
                "contract": self.contract,
                "protocol_flat_fee": fee.to_string(),
            }))?;
        } else {
            println!("Protocol flat fee of {}: {}", self.contract, fee);
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct UpdateFeeCmd {
    /// Account submitting the update
    #[arg(long)]
    caller: AccountId,

    /// Wrapped-asset contract address (validated by the module)
    #[arg(long)]
    contract: String,

    /// New protocol flat fee (decimal or 0x hex)
    #[arg(long, value_parser = parse_u256)]
    fee: U256,
}

impl UpdateFeeCmd {
    pub fn execute(self, state: &mut AdminState, json: bool) -> Result<()> {
        let request = FeeUpdateRequest::new(self.caller, self.contract, self.fee);
        let mut ctx = state.next_context();
        let outcome = state.keeper.update_withdraw_fee(&mut ctx, &request)?;

        if json {
            print_json(&serde_json::json!({
                "contract": request.contract_address,
                "previous_fee": outcome.previous_fee.to_string(),
                "new_fee": outcome.new_fee.to_string(),
                "gas_used": outcome.gas_used,
                "events": ctx.events(),
            }))?;
        } else {
            println!(
                "Protocol flat fee updated: {} -> {} (gas used {})",
                outcome.previous_fee, outcome.new_fee, outcome.gas_used
            );
            for event in ctx.events() {
                println!("  {}", format_event(event));
            }
        }
        Ok(())
    }
}
