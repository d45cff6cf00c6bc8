//! Registered wrapped-asset records.
//!
//! A [`ForeignCoin`] describes an asset that originates on another chain and
//! is represented here by a wrapped-asset contract. Records are created when
//! the asset is onboarded and are read-only for fee administration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::address::ChainAddress;
use crate::amount::U256;

/// Kind of the wrapped asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinType {
    /// The ledger's own native coin.
    Zeta,
    /// The gas coin of the foreign chain.
    Gas,
    /// A token contract on the foreign chain.
    Erc20,
}

impl fmt::Display for CoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CoinType::Zeta => "zeta",
            CoinType::Gas => "gas",
            CoinType::Erc20 => "erc20",
        };
        f.write_str(s)
    }
}

impl FromStr for CoinType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zeta" => Ok(CoinType::Zeta),
            "gas" => Ok(CoinType::Gas),
            "erc20" => Ok(CoinType::Erc20),
            other => Err(format!(
                "unknown coin type '{}' (expected zeta, gas or erc20)",
                other
            )),
        }
    }
}

/// A registered wrapped foreign asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignCoin {
    /// Address of the wrapped-asset contract (registry key).
    pub contract_address: ChainAddress,
    /// Asset identifier on the origin chain; empty for gas coins.
    pub asset: String,
    pub foreign_chain_id: i64,
    pub decimals: u32,
    pub name: String,
    pub symbol: String,
    pub coin_type: CoinType,
    /// Gas limit used when the asset is withdrawn to its origin chain.
    pub gas_limit: u64,
    pub paused: bool,
    /// Maximum supply that may be minted; zero means uncapped.
    #[serde(with = "crate::amount::u256_decimal")]
    pub liquidity_cap: U256,
}

impl ForeignCoin {
    /// Create a gas-coin record with 18 decimals and no cap.
    pub fn new(contract_address: ChainAddress, foreign_chain_id: i64, symbol: &str) -> Self {
        Self {
            contract_address,
            asset: String::new(),
            foreign_chain_id,
            decimals: 18,
            name: symbol.to_string(),
            symbol: symbol.to_string(),
            coin_type: CoinType::Gas,
            gas_limit: DEFAULT_WITHDRAW_GAS_LIMIT,
            paused: false,
            liquidity_cap: U256::zero(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_coin_type(mut self, coin_type: CoinType) -> Self {
        self.coin_type = coin_type;
        self
    }

    pub fn with_asset(mut self, asset: &str) -> Self {
        self.asset = asset.to_string();
        self
    }

    pub fn with_liquidity_cap(mut self, cap: U256) -> Self {
        self.liquidity_cap = cap;
        self
    }
}

/// Default withdraw gas limit for newly onboarded coins.
pub const DEFAULT_WITHDRAW_GAS_LIMIT: u64 = 21_000;
