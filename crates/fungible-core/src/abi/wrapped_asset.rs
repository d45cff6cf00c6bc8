//! Method table of the wrapped-asset contract.
//!
//! The contract keeps its protocol fee and withdraw gas limit in its own
//! storage; these are the only entry points the module calls.

use super::function::Function;
use super::token::ParamType;

pub const PROTOCOL_FLAT_FEE: &str = "PROTOCOL_FLAT_FEE";
pub const UPDATE_PROTOCOL_FLAT_FEE: &str = "updateProtocolFlatFee";
pub const GAS_LIMIT: &str = "GAS_LIMIT";
pub const UPDATE_GAS_LIMIT: &str = "updateGasLimit";
pub const CHAIN_ID: &str = "CHAIN_ID";

/// `PROTOCOL_FLAT_FEE() returns (uint256)`
pub fn protocol_flat_fee() -> Function {
    Function::new(PROTOCOL_FLAT_FEE, vec![], vec![ParamType::Uint])
}

/// `updateProtocolFlatFee(uint256)`
pub fn update_protocol_flat_fee() -> Function {
    Function::new(UPDATE_PROTOCOL_FLAT_FEE, vec![ParamType::Uint], vec![])
}

/// `GAS_LIMIT() returns (uint256)`
pub fn gas_limit() -> Function {
    Function::new(GAS_LIMIT, vec![], vec![ParamType::Uint])
}

/// `updateGasLimit(uint256)`
pub fn update_gas_limit() -> Function {
    Function::new(UPDATE_GAS_LIMIT, vec![ParamType::Uint], vec![])
}

/// `CHAIN_ID() returns (uint256)`
pub fn chain_id() -> Function {
    Function::new(CHAIN_ID, vec![], vec![ParamType::Uint])
}

pub fn decimals() -> Function {
    Function::new("decimals", vec![], vec![ParamType::Uint])
}

pub fn symbol() -> Function {
    Function::new("symbol", vec![], vec![ParamType::String])
}

pub fn name() -> Function {
    Function::new("name", vec![], vec![ParamType::String])
}

/// Every method the contract answers.
pub fn all() -> Vec<Function> {
    vec![
        protocol_flat_fee(),
        update_protocol_flat_fee(),
        gas_limit(),
        update_gas_limit(),
        chain_id(),
        decimals(),
        symbol(),
        name(),
    ]
}
