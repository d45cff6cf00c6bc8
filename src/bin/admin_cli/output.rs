//! Output formatting for fungible-admin CLI
//!
//! Every command prints either human-readable text or, with `--json`, a
//! single pretty-printed JSON document.

use anyhow::Result;
use fungible_admin_core::ModuleEvent;
use fungible_admin_types::{ForeignCoin, PermissionFlags};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Table of registered coins, one per line.
pub fn format_coins(coins: &[ForeignCoin]) -> String {
    if coins.is_empty() {
        return "No foreign coins registered\n".to_string();
    }
    let mut out = format!(
        "{:<44} {:<8} {:<8} {:>10} {:>8}\n",
        "CONTRACT", "SYMBOL", "TYPE", "CHAIN", "DECIMALS"
    );
    for coin in coins {
        out.push_str(&format!(
            "{:<44} {:<8} {:<8} {:>10} {:>8}{}\n",
            coin.contract_address.to_string(),
            coin.symbol,
            coin.coin_type.to_string(),
            coin.foreign_chain_id,
            coin.decimals,
            if coin.paused { "  (paused)" } else { "" }
        ));
    }
    out
}

pub fn format_flags(flags: Option<PermissionFlags>) -> String {
    match flags {
        None => "Permission flags: not set (inbound disabled, outbound disabled)".to_string(),
        Some(f) => format!(
            "Permission flags: inbound {}, outbound {}",
            enabled(f.is_inbound_enabled),
            enabled(f.is_outbound_enabled)
        ),
    }
}

pub fn format_event(event: &ModuleEvent) -> String {
    match event {
        ModuleEvent::FeeUpdated(e) => format!(
            "[{}] fee_updated contract={} chain={} old_fee={} new_fee={} signer={}",
            e.block_height, e.contract, e.chain_id, e.old_fee, e.new_fee, e.signer
        ),
        ModuleEvent::CoinDeployed(e) => format!(
            "[{}] coin_deployed contract={} chain={} symbol={} type={}",
            e.block_height, e.contract, e.chain_id, e.symbol, e.coin_type
        ),
    }
}

fn enabled(on: bool) -> &'static str {
    if on {
        "enabled"
    } else {
        "disabled"
    }
}
