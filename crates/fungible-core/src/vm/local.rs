//! In-process contract engine.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{bail, Result};
use fungible_admin_types::ChainAddress;
use tracing::{debug, trace, warn};

use super::gas::{GasMeter, GasSchedule};
use super::overlay::WriteOverlay;
use super::program::{CallEnv, ContractProgram, Halt};
use super::{CallOutput, ContractCall, VmError, VmGateway};
use crate::context::Context;
use crate::store::{KvStore, PrefixStore};

const CONTRACT_STORAGE_PREFIX: &[u8] = b"evm/storage/";

/// Default gas budget for calls that do not carry one.
pub const DEFAULT_CALL_GAS_LIMIT: u64 = 1_000_000;

/// Store prefix under which `address` keeps its storage.
pub fn contract_storage_prefix(address: &ChainAddress) -> Vec<u8> {
    let mut prefix = CONTRACT_STORAGE_PREFIX.to_vec();
    prefix.extend_from_slice(address.as_bytes());
    prefix.push(b'/');
    prefix
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Observe,
    Commit,
}

/// Executes native contract programs against a ledger store.
///
/// Contract storage lives in the same store as the module's own records,
/// under [`contract_storage_prefix`]. Programs themselves are not persisted;
/// a restored session re-registers them with [`LocalVm::register_program`].
pub struct LocalVm<S> {
    store: S,
    programs: BTreeMap<ChainAddress, Arc<dyn ContractProgram>>,
    schedule: GasSchedule,
    default_gas_limit: u64,
    halted: Option<String>,
}

impl<S: KvStore> LocalVm<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            programs: BTreeMap::new(),
            schedule: GasSchedule::default(),
            default_gas_limit: DEFAULT_CALL_GAS_LIMIT,
            halted: None,
        }
    }

    pub fn with_gas_schedule(mut self, schedule: GasSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_default_gas_limit(mut self, limit: u64) -> Self {
        self.default_gas_limit = limit;
        self
    }

    pub fn gas_schedule(&self) -> &GasSchedule {
        &self.schedule
    }

    /// Install `program` at `address` and seed its storage.
    pub fn deploy(
        &mut self,
        address: ChainAddress,
        program: Arc<dyn ContractProgram>,
        initial_storage: Vec<(String, Vec<u8>)>,
    ) -> Result<()> {
        if self.programs.contains_key(&address) {
            bail!("contract already deployed at {}", address);
        }
        let storage = self.storage_of(&address);
        for (slot, value) in initial_storage {
            storage.set(slot.as_bytes(), value);
        }
        debug!(contract = %address, kind = program.kind(), "deployed contract");
        self.programs.insert(address, program);
        Ok(())
    }

    /// Attach `program` to `address` without touching its storage.
    pub fn register_program(&mut self, address: ChainAddress, program: Arc<dyn ContractProgram>) {
        self.programs.insert(address, program);
    }

    pub fn is_deployed(&self, address: &ChainAddress) -> bool {
        self.programs.contains_key(address)
    }

    /// Deployed addresses with their program kind, in address order.
    pub fn deployments(&self) -> Vec<(ChainAddress, String)> {
        self.programs
            .iter()
            .map(|(addr, program)| (*addr, program.kind().to_string()))
            .collect()
    }

    /// Direct view of a contract's storage.
    pub fn storage_of(&self, address: &ChainAddress) -> PrefixStore<&S> {
        PrefixStore::new(&self.store, contract_storage_prefix(address))
    }

    /// Make every subsequent call fail with [`VmError::StartupFailure`].
    pub fn halt(&mut self, reason: impl Into<String>) {
        self.halted = Some(reason.into());
    }

    pub fn resume(&mut self) {
        self.halted = None;
    }

    fn execute(&self, ctx: &Context, call: &ContractCall, mode: Mode) -> Result<CallOutput, VmError> {
        if let Some(reason) = &self.halted {
            warn!(contract = %call.to, reason = %reason, "vm halted, rejecting call");
            return Err(VmError::StartupFailure(reason.clone()));
        }

        let limit = call.gas_limit.unwrap_or(self.default_gas_limit);
        let mut meter = GasMeter::new(limit);
        let intrinsic = self.schedule.intrinsic(call.input.len());
        if meter.charge(intrinsic).is_err() {
            return Err(VmError::OutOfGas {
                limit,
                used: intrinsic,
            });
        }

        let Some(program) = self.programs.get(&call.to) else {
            trace!(contract = %call.to, "no code at address, returning empty output");
            return Ok(CallOutput {
                data: Vec::new(),
                gas_used: meter.used(),
            });
        };

        if !call.value.is_zero() && !program.payable() {
            return Err(VmError::Reverted {
                reason: "non-payable contract received value".to_string(),
                gas_used: meter.used(),
            });
        }

        let storage = self.storage_of(&call.to);
        let mut env = CallEnv::new(
            call.from,
            call.to,
            call.value,
            ctx.block_height(),
            WriteOverlay::new(&storage),
            meter,
            self.schedule,
        );
        let result = program.execute(&mut env, &call.input);
        let (overlay, gas_used) = env.finish();

        match result {
            Ok(data) => {
                match mode {
                    Mode::Observe => {
                        if overlay.is_dirty() {
                            trace!(
                                contract = %call.to,
                                discarded = overlay.pending(),
                                "discarding writes made during observe"
                            );
                        }
                    }
                    Mode::Commit => {
                        let touched = overlay.apply();
                        debug!(contract = %call.to, slots = touched, gas_used, "committed call");
                    }
                }
                Ok(CallOutput { data, gas_used })
            }
            Err(Halt::Revert(reason)) => {
                debug!(contract = %call.to, reason = %reason, ?mode, "call reverted");
                Err(VmError::Reverted { reason, gas_used })
            }
            Err(Halt::OutOfGas) => {
                debug!(contract = %call.to, limit, ?mode, "call ran out of gas");
                Err(VmError::OutOfGas {
                    limit,
                    used: gas_used,
                })
            }
        }
    }
}

impl<S: KvStore> VmGateway for LocalVm<S> {
    fn observe(&mut self, ctx: &Context, call: &ContractCall) -> Result<CallOutput, VmError> {
        self.execute(ctx, call, Mode::Observe)
    }

    fn commit(&mut self, ctx: &Context, call: &ContractCall) -> Result<CallOutput, VmError> {
        self.execute(ctx, call, Mode::Commit)
    }
}
