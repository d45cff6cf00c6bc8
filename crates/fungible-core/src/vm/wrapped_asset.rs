//! Native implementation of the wrapped-asset contract.

use fungible_admin_types::{ChainAddress, ForeignCoin, U256};

use super::program::{encode_uint_slot, CallEnv, ContractProgram, Halt};
use crate::abi::{wrapped_asset as methods, Function, Token};

/// Program kind recorded for wrapped-asset deployments.
pub const WRAPPED_ASSET_KIND: &str = "wrapped_asset";

/// Storage slot names.
pub mod slots {
    pub const PROTOCOL_FLAT_FEE: &str = "protocol_flat_fee";
    pub const GAS_LIMIT: &str = "gas_limit";
    pub const DECIMALS: &str = "decimals";
    pub const SYMBOL: &str = "symbol";
    pub const NAME: &str = "name";
    pub const CHAIN_ID: &str = "chain_id";
}

const NOT_MODULE: &str = "caller is not the fungible module";

/// The wrapped-asset contract.
///
/// Read methods are open to anyone. The two update methods only accept
/// calls from the module address the contract was deployed with.
#[derive(Debug, Clone)]
pub struct WrappedAssetProgram {
    module_address: ChainAddress,
}

impl WrappedAssetProgram {
    pub fn new(module_address: ChainAddress) -> Self {
        Self { module_address }
    }

    pub fn module_address(&self) -> ChainAddress {
        self.module_address
    }

    /// Storage a freshly deployed contract starts with.
    pub fn initial_storage(coin: &ForeignCoin, protocol_flat_fee: U256) -> Vec<(String, Vec<u8>)> {
        let chain_id = U256::from(coin.foreign_chain_id.unsigned_abs());
        vec![
            (
                slots::PROTOCOL_FLAT_FEE.to_string(),
                encode_uint_slot(protocol_flat_fee),
            ),
            (
                slots::GAS_LIMIT.to_string(),
                encode_uint_slot(U256::from(coin.gas_limit)),
            ),
            (
                slots::DECIMALS.to_string(),
                encode_uint_slot(U256::from(coin.decimals)),
            ),
            (slots::SYMBOL.to_string(), coin.symbol.clone().into_bytes()),
            (slots::NAME.to_string(), coin.name.clone().into_bytes()),
            (slots::CHAIN_ID.to_string(), encode_uint_slot(chain_id)),
        ]
    }

    fn read_uint(env: &mut CallEnv<'_>, method: &Function, input: &[u8], slot: &str) -> Result<Vec<u8>, Halt> {
        decode_args(method, input)?;
        let value = env.load_uint(slot)?;
        encode_result(method, &[Token::Uint(value)])
    }

    fn read_string(env: &mut CallEnv<'_>, method: &Function, input: &[u8], slot: &str) -> Result<Vec<u8>, Halt> {
        decode_args(method, input)?;
        let value = env.load_string(slot)?;
        encode_result(method, &[Token::String(value)])
    }

    fn write_uint(&self, env: &mut CallEnv<'_>, method: &Function, input: &[u8], slot: &str) -> Result<Vec<u8>, Halt> {
        if env.caller != self.module_address {
            return Err(Halt::revert(NOT_MODULE));
        }
        let value = decode_args(method, input)?
            .into_iter()
            .next()
            .and_then(Token::into_uint)
            .ok_or_else(|| Halt::revert("invalid calldata: expected uint256"))?;
        env.store_uint(slot, value)?;
        Ok(Vec::new())
    }
}

impl ContractProgram for WrappedAssetProgram {
    fn kind(&self) -> &str {
        WRAPPED_ASSET_KIND
    }

    fn execute(&self, env: &mut CallEnv<'_>, input: &[u8]) -> Result<Vec<u8>, Halt> {
        if input.len() < 4 {
            return Err(Halt::revert("missing selector"));
        }
        let selector = &input[..4];

        let method = methods::all()
            .into_iter()
            .find(|m| &m.selector()[..] == selector)
            .ok_or_else(|| Halt::revert("unknown selector"))?;

        match method.name.as_str() {
            methods::PROTOCOL_FLAT_FEE => {
                Self::read_uint(env, &method, input, slots::PROTOCOL_FLAT_FEE)
            }
            methods::GAS_LIMIT => Self::read_uint(env, &method, input, slots::GAS_LIMIT),
            methods::CHAIN_ID => Self::read_uint(env, &method, input, slots::CHAIN_ID),
            "decimals" => Self::read_uint(env, &method, input, slots::DECIMALS),
            "symbol" => Self::read_string(env, &method, input, slots::SYMBOL),
            "name" => Self::read_string(env, &method, input, slots::NAME),
            methods::UPDATE_PROTOCOL_FLAT_FEE => {
                self.write_uint(env, &method, input, slots::PROTOCOL_FLAT_FEE)
            }
            methods::UPDATE_GAS_LIMIT => self.write_uint(env, &method, input, slots::GAS_LIMIT),
            _ => Err(Halt::revert("unknown selector")),
        }
    }
}

fn decode_args(method: &Function, input: &[u8]) -> Result<Vec<Token>, Halt> {
    method
        .decode_input(input)
        .map_err(|e| Halt::revert(format!("invalid calldata: {}", e)))
}

fn encode_result(method: &Function, values: &[Token]) -> Result<Vec<u8>, Halt> {
    method
        .encode_output(values)
        .map_err(|e| Halt::revert(format!("invalid return data: {}", e)))
}
