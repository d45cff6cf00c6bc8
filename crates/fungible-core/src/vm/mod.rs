//! Contract execution gateway.
//!
//! The fee orchestrator never executes contract code itself. It hands a
//! [`ContractCall`] to a [`VmGateway`] in one of two modes:
//!
//! - **observe**: run the call and return its output; nothing it writes is
//!   kept.
//! - **commit**: run the call and persist its writes if, and only if, it
//!   succeeds.
//!
//! [`LocalVm`] is the in-process implementation used by the keeper and the
//! CLI. Contract code is a native [`ContractProgram`] registered at an
//! address; each call runs against a [`WriteOverlay`] on top of the
//! contract's slice of the ledger store.

mod gas;
mod local;
mod overlay;
mod program;
mod wrapped_asset;

pub use gas::{GasMeter, GasSchedule};
pub use local::{contract_storage_prefix, LocalVm, DEFAULT_CALL_GAS_LIMIT};
pub use overlay::WriteOverlay;
pub use program::{CallEnv, ContractProgram, Halt};
pub use wrapped_asset::{slots, WrappedAssetProgram, WRAPPED_ASSET_KIND};

use std::fmt;

use fungible_admin_types::{ChainAddress, U256};

use crate::context::Context;

/// A message call into a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub from: ChainAddress,
    pub to: ChainAddress,
    /// Selector followed by ABI-encoded arguments
    pub input: Vec<u8>,
    pub value: U256,
    /// Gas budget; `None` uses the gateway default
    pub gas_limit: Option<u64>,
}

impl ContractCall {
    pub fn new(from: ChainAddress, to: ChainAddress, input: Vec<u8>) -> Self {
        Self {
            from,
            to,
            input,
            value: U256::zero(),
            gas_limit: None,
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }
}

/// Result of a successful call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallOutput {
    pub data: Vec<u8>,
    pub gas_used: u64,
}

/// Why a call did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmError {
    /// The contract rejected the call.
    Reverted { reason: String, gas_used: u64 },
    /// The call exhausted its gas budget.
    OutOfGas { limit: u64, used: u64 },
    /// The execution environment could not run the call at all.
    StartupFailure(String),
}

impl VmError {
    pub fn gas_used(&self) -> u64 {
        match self {
            VmError::Reverted { gas_used, .. } => *gas_used,
            VmError::OutOfGas { used, .. } => *used,
            VmError::StartupFailure(_) => 0,
        }
    }
}

impl fmt::Display for VmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmError::Reverted { reason, gas_used } => {
                write!(f, "execution reverted: {} (gas used {})", reason, gas_used)
            }
            VmError::OutOfGas { limit, used } => {
                write!(f, "out of gas: used {} of {}", used, limit)
            }
            VmError::StartupFailure(reason) => write!(f, "vm failed to start: {}", reason),
        }
    }
}

impl std::error::Error for VmError {}

/// Runs contract calls on behalf of the module.
///
/// The two modes are separate methods so that a test double can script
/// each one independently.
pub trait VmGateway {
    /// Execute `call` without persisting any state change.
    fn observe(&mut self, ctx: &Context, call: &ContractCall) -> Result<CallOutput, VmError>;

    /// Execute `call` and persist its state changes on success.
    fn commit(&mut self, ctx: &Context, call: &ContractCall) -> Result<CallOutput, VmError>;
}

impl<T: VmGateway + ?Sized> VmGateway for &mut T {
    fn observe(&mut self, ctx: &Context, call: &ContractCall) -> Result<CallOutput, VmError> {
        (**self).observe(ctx, call)
    }

    fn commit(&mut self, ctx: &Context, call: &ContractCall) -> Result<CallOutput, VmError> {
        (**self).commit(ctx, call)
    }
}

impl<T: VmGateway + ?Sized> VmGateway for Box<T> {
    fn observe(&mut self, ctx: &Context, call: &ContractCall) -> Result<CallOutput, VmError> {
        (**self).observe(ctx, call)
    }

    fn commit(&mut self, ctx: &Context, call: &ContractCall) -> Result<CallOutput, VmError> {
        (**self).commit(ctx, call)
    }
}
