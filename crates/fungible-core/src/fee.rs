//! Protocol flat fee administration.
//!
//! [`FeeUpdater::update_fee`] is the privileged path that replaces the flat
//! fee a wrapped-asset contract charges on withdrawals. It runs five checks
//! in a fixed order and stops at the first failure:
//!
//! 1. the caller is the configured admin
//! 2. the contract address parses
//! 3. the address is a registered foreign coin
//! 4. the current fee can be read from the contract (observe)
//! 5. the new fee is written to the contract (commit)
//!
//! Only step 5 changes state, and only when it succeeds.

use fungible_admin_types::{AccountId, ChainAddress, U256};
use tracing::{debug, info, warn};

use crate::abi::{wrapped_asset, AbiError, Function, Token};
use crate::authority::AdminLookup;
use crate::config::FungibleConfig;
use crate::context::{Context, FeeUpdatedEvent, ModuleEvent};
use crate::errors::{CallFailure, CallPhase, FungibleError};
use crate::registry::ForeignCoinLookup;
use crate::vm::{ContractCall, VmGateway};

/// A request to set the protocol flat fee of one wrapped asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeUpdateRequest {
    pub caller: AccountId,
    /// Contract address as submitted; parsed during the update
    pub contract_address: String,
    pub new_fee: U256,
}

impl FeeUpdateRequest {
    pub fn new(caller: AccountId, contract_address: impl Into<String>, new_fee: U256) -> Self {
        Self {
            caller,
            contract_address: contract_address.into(),
            new_fee,
        }
    }
}

/// What a successful update changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeUpdateOutcome {
    pub previous_fee: U256,
    pub new_fee: U256,
    /// Gas used by the observe and commit calls together
    pub gas_used: u64,
}

/// Runs fee updates against an admin source, a registry and a VM.
pub struct FeeUpdater<'a> {
    admin: &'a dyn AdminLookup,
    registry: &'a dyn ForeignCoinLookup,
    gateway: &'a mut dyn VmGateway,
    module_address: ChainAddress,
    gas_limit: u64,
}

impl<'a> FeeUpdater<'a> {
    pub fn new(
        admin: &'a dyn AdminLookup,
        registry: &'a dyn ForeignCoinLookup,
        gateway: &'a mut dyn VmGateway,
        config: &FungibleConfig,
    ) -> Self {
        Self {
            admin,
            registry,
            gateway,
            module_address: config.module_address,
            gas_limit: config.call_gas_limit,
        }
    }

    /// Replace the protocol flat fee of a registered wrapped asset.
    ///
    /// On success the previous fee is returned and a
    /// [`FeeUpdatedEvent`] is emitted into `ctx`. Any error leaves the
    /// ledger exactly as it was.
    pub fn update_fee(
        &mut self,
        ctx: &mut Context,
        request: &FeeUpdateRequest,
    ) -> Result<FeeUpdateOutcome, FungibleError> {
        debug!(
            caller = %request.caller,
            contract = %request.contract_address,
            new_fee = %request.new_fee,
            "updating protocol flat fee"
        );

        match self.admin.admin() {
            Some(admin) if admin == request.caller => {}
            configured => {
                warn!(
                    caller = %request.caller,
                    admin_configured = configured.is_some(),
                    "fee update rejected: caller is not the admin"
                );
                return Err(FungibleError::Unauthorized {
                    caller: request.caller.clone(),
                });
            }
        }

        let contract = ChainAddress::parse(&request.contract_address).map_err(|source| {
            warn!(
                input = %request.contract_address,
                error = %source,
                "fee update rejected: malformed contract address"
            );
            FungibleError::InvalidAddress {
                input: request.contract_address.clone(),
                source,
            }
        })?;

        let coin = self.registry.foreign_coin(&contract).ok_or_else(|| {
            warn!(contract = %contract, "fee update rejected: contract is not a registered foreign coin");
            FungibleError::ForeignCoinNotFound { address: contract }
        })?;

        let (previous_fee, observe_gas) = self.observe_fee(ctx, &contract)?;

        let method = wrapped_asset::update_protocol_flat_fee();
        let input = method
            .encode_input(&[Token::Uint(request.new_fee)])
            .map_err(|e| {
                call_error(
                    CallPhase::Commit,
                    contract,
                    &method,
                    Some(previous_fee),
                    CallFailure::Encode(e),
                )
            })?;
        let call = self.call(contract, input);
        let output = self.gateway.commit(ctx, &call).map_err(|e| {
            call_error(
                CallPhase::Commit,
                contract,
                &method,
                Some(previous_fee),
                CallFailure::Vm(e),
            )
        })?;

        let outcome = FeeUpdateOutcome {
            previous_fee,
            new_fee: request.new_fee,
            gas_used: observe_gas.saturating_add(output.gas_used),
        };

        ctx.emit(ModuleEvent::FeeUpdated(FeeUpdatedEvent {
            chain_id: coin.foreign_chain_id,
            coin_type: coin.coin_type,
            contract,
            old_fee: previous_fee,
            new_fee: request.new_fee,
            signer: request.caller.clone(),
            block_height: ctx.block_height(),
        }));

        info!(
            contract = %contract,
            symbol = %coin.symbol,
            chain_id = coin.foreign_chain_id,
            old_fee = %previous_fee,
            new_fee = %request.new_fee,
            gas_used = outcome.gas_used,
            "protocol flat fee updated"
        );
        Ok(outcome)
    }

    /// Read the protocol flat fee currently stored in `contract`.
    ///
    /// Read-only: no authorization and no registry lookup.
    pub fn query_protocol_flat_fee(
        &mut self,
        ctx: &Context,
        contract: &ChainAddress,
    ) -> Result<U256, FungibleError> {
        self.observe_fee(ctx, contract).map(|(fee, _)| fee)
    }

    fn observe_fee(
        &mut self,
        ctx: &Context,
        contract: &ChainAddress,
    ) -> Result<(U256, u64), FungibleError> {
        let method = wrapped_asset::protocol_flat_fee();
        let fail = |failure: CallFailure| call_error(CallPhase::Observe, *contract, &method, None, failure);

        let input = method.encode_input(&[]).map_err(|e| fail(CallFailure::Encode(e)))?;
        let call = self.call(*contract, input);
        let output = self
            .gateway
            .observe(ctx, &call)
            .map_err(|e| fail(CallFailure::Vm(e)))?;

        let fee = method
            .decode_output(&output.data)
            .map_err(|e| fail(CallFailure::Decode(e)))?
            .into_iter()
            .next()
            .and_then(Token::into_uint);
        // decode_output checked the layout, so this only guards the type
        match fee {
            Some(fee) => Ok((fee, output.gas_used)),
            None => Err(fail(CallFailure::Decode(AbiError::ArgumentCount {
                expected: 1,
                got: 0,
            }))),
        }
    }

    fn call(&self, contract: ChainAddress, input: Vec<u8>) -> ContractCall {
        ContractCall::new(self.module_address, contract, input).with_gas_limit(self.gas_limit)
    }
}

fn call_error(
    phase: CallPhase,
    contract: ChainAddress,
    method: &Function,
    previous_fee: Option<U256>,
    source: CallFailure,
) -> FungibleError {
    warn!(
        contract = %contract,
        method = %method.name,
        %phase,
        error = %source,
        "fee update contract call failed"
    );
    FungibleError::ContractCall {
        phase,
        contract,
        method: method.name.clone(),
        previous_fee,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::{CallOutput, VmError};
    use fungible_admin_types::ForeignCoin;

    /// Gateway that answers observe with a fixed fee and records commits.
    struct FixedFee {
        fee: U256,
        commits: Vec<ContractCall>,
    }

    impl VmGateway for FixedFee {
        fn observe(&mut self, _ctx: &Context, _call: &ContractCall) -> Result<CallOutput, VmError> {
            let data = wrapped_asset::protocol_flat_fee()
                .encode_output(&[Token::Uint(self.fee)])
                .unwrap();
            Ok(CallOutput { data, gas_used: 10 })
        }

        fn commit(&mut self, _ctx: &Context, call: &ContractCall) -> Result<CallOutput, VmError> {
            self.commits.push(call.clone());
            Ok(CallOutput {
                data: vec![],
                gas_used: 5,
            })
        }
    }

    struct OneCoin(ForeignCoin);

    impl ForeignCoinLookup for OneCoin {
        fn foreign_coin(&self, address: &ChainAddress) -> Option<ForeignCoin> {
            (self.0.contract_address == *address).then(|| self.0.clone())
        }
    }

    #[test]
    fn test_commit_call_shape() {
        let admin = AccountId::new("admin").unwrap();
        let lookup = || Some(AccountId::new("admin").unwrap());
        let coin = ForeignCoin::new(ChainAddress::from_low_u64(0x10), 5, "ETH");
        let registry = OneCoin(coin.clone());
        let mut gateway = FixedFee {
            fee: U256::from(7u64),
            commits: vec![],
        };
        let config = FungibleConfig::default().with_call_gas_limit(123_456);

        let mut ctx = Context::new(9, 7000);
        let request = FeeUpdateRequest::new(admin, coin.contract_address.to_string(), U256::from(8u64));
        let outcome = FeeUpdater::new(&lookup, &registry, &mut gateway, &config)
            .update_fee(&mut ctx, &request)
            .unwrap();

        assert_eq!(outcome.previous_fee, U256::from(7u64));
        assert_eq!(outcome.gas_used, 15);

        let commit = &gateway.commits[0];
        assert_eq!(commit.from, config.module_address);
        assert_eq!(commit.to, coin.contract_address);
        assert_eq!(commit.gas_limit, Some(123_456));
        assert!(commit.value.is_zero());
        assert_eq!(
            wrapped_asset::update_protocol_flat_fee()
                .decode_input(&commit.input)
                .unwrap(),
            vec![Token::Uint(U256::from(8u64))]
        );
    }
}
