//! `deploy` and `coins` subcommands: onboard wrapped assets and list them.

use anyhow::Result;
use clap::Args;
use fungible_admin_types::{parse_u256, ChainAddress, CoinType, ForeignCoin, U256};

use super::output::{format_coins, format_event, print_json};
use super::AdminState;

#[derive(Args)]
pub struct DeployCmd {
    /// Address to deploy the wrapped-asset contract at
    #[arg(long)]
    contract: ChainAddress,

    #[arg(long)]
    symbol: String,

    #[arg(long)]
    name: String,

    /// Chain id of the asset's origin chain
    #[arg(long)]
    chain_id: i64,

    #[arg(long, default_value_t = 18)]
    decimals: u32,

    /// gas, erc20 or zeta
    #[arg(long, default_value = "gas")]
    coin_type: CoinType,

    /// Asset identifier on the origin chain (empty for gas coins)
    #[arg(long, default_value = "")]
    asset: String,

    /// Initial protocol flat fee (decimal or 0x hex)
    #[arg(long, default_value = "0", value_parser = parse_u256)]
    fee: U256,

    /// Withdraw gas limit stored in the contract
    #[arg(long)]
    gas_limit: Option<u64>,
}

impl DeployCmd {
    pub fn execute(self, state: &mut AdminState, json: bool) -> Result<()> {
        let mut coin = ForeignCoin::new(self.contract, self.chain_id, &self.symbol)
            .with_name(&self.name)
            .with_decimals(self.decimals)
            .with_coin_type(self.coin_type)
            .with_asset(&self.asset);
        if let Some(gas_limit) = self.gas_limit {
            coin.gas_limit = gas_limit;
        }

        let mut ctx = state.next_context();
        state
            .keeper
            .deploy_wrapped_asset(&mut ctx, coin.clone(), self.fee)?;
        state.record_deployment(coin.contract_address);

        if json {
            print_json(&serde_json::json!({
                "coin": coin,
                "protocol_flat_fee": self.fee.to_string(),
                "events": ctx.events(),
            }))?;
        } else {
            println!(
                "Deployed {} ({}) at {} with protocol flat fee {}",
                coin.symbol, coin.coin_type, coin.contract_address, self.fee
            );
            for event in ctx.events() {
                println!("  {}", format_event(event));
            }
        }
        Ok(())
    }
}

/// List registered foreign coins.
pub fn list_coins(state: &AdminState, json: bool) -> Result<()> {
    let coins = state.keeper.foreign_coins()?;
    if json {
        print_json(&coins)?;
    } else {
        print!("{}", format_coins(&coins));
    }
    Ok(())
}
