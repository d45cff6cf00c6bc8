//! Module configuration.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use fungible_admin_types::env_utils::{env_string, env_var};
use fungible_admin_types::ChainAddress;

use crate::authority::module_address;
use crate::vm::{GasSchedule, DEFAULT_CALL_GAS_LIMIT};

/// Name of the module; its account address is derived from it.
pub const MODULE_NAME: &str = "fungible";

/// Configuration of the fungible module.
#[derive(Debug, Clone)]
pub struct FungibleConfig {
    /// Account the module calls contracts from. Wrapped-asset contracts
    /// only accept fee updates from this address.
    pub module_address: ChainAddress,

    /// Gas limit attached to every observe and commit call.
    pub call_gas_limit: u64,

    /// Gas costs of the local VM.
    pub gas_schedule: GasSchedule,

    /// Where the CLI keeps its session state, if overridden.
    pub state_file: Option<PathBuf>,
}

impl Default for FungibleConfig {
    fn default() -> Self {
        Self {
            module_address: module_address(MODULE_NAME),
            call_gas_limit: DEFAULT_CALL_GAS_LIMIT,
            gas_schedule: GasSchedule::default(),
            state_file: None,
        }
    }
}

impl FungibleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by environment variables.
    ///
    /// - `FUNGIBLE_MODULE_ADDRESS`: module account address
    /// - `FUNGIBLE_CALL_GAS_LIMIT`: gas limit per contract call
    /// - `FUNGIBLE_ADMIN_STATE`: CLI state file
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(addr) = env_string("FUNGIBLE_MODULE_ADDRESS") {
            config.module_address = ChainAddress::parse(&addr)
                .with_context(|| format!("FUNGIBLE_MODULE_ADDRESS is not an address: {}", addr))?;
        }
        if let Some(raw) = env_string("FUNGIBLE_CALL_GAS_LIMIT") {
            config.call_gas_limit = env_var::<u64>("FUNGIBLE_CALL_GAS_LIMIT")
                .with_context(|| format!("FUNGIBLE_CALL_GAS_LIMIT is not a number: {}", raw))?;
        }
        config.state_file = env_string("FUNGIBLE_ADMIN_STATE").map(PathBuf::from);
        Ok(config)
    }

    pub fn with_module_address(mut self, address: ChainAddress) -> Self {
        self.module_address = address;
        self
    }

    pub fn with_call_gas_limit(mut self, limit: u64) -> Self {
        self.call_gas_limit = limit;
        self
    }

    pub fn with_gas_schedule(mut self, schedule: GasSchedule) -> Self {
        self.gas_schedule = schedule;
        self
    }

    pub fn with_state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_file = Some(path.into());
        self
    }
}
