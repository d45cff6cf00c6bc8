//! Test doubles for the module's collaborators.

use std::cell::Cell;

use fungible_admin_core::{
    CallOutput, Context, ContractCall, ForeignCoinLookup, VmError, VmGateway,
};
use fungible_admin_types::{ChainAddress, ForeignCoin};

/// What a scripted mode does when called.
#[derive(Debug, Clone)]
pub enum Script {
    /// Forward to the wrapped gateway
    Delegate,
    /// Return this output without running anything
    Respond(CallOutput),
    /// Fail with this error without running anything
    Fail(VmError),
}

/// Gateway whose observe and commit modes are scripted independently.
///
/// Every call is recorded, whether or not it reached the inner gateway.
pub struct ScriptedGateway<G> {
    pub inner: G,
    pub observe: Script,
    pub commit: Script,
    pub observed: Vec<ContractCall>,
    pub committed: Vec<ContractCall>,
}

impl<G: VmGateway> ScriptedGateway<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            observe: Script::Delegate,
            commit: Script::Delegate,
            observed: Vec::new(),
            committed: Vec::new(),
        }
    }

    pub fn with_observe(mut self, script: Script) -> Self {
        self.observe = script;
        self
    }

    pub fn with_commit(mut self, script: Script) -> Self {
        self.commit = script;
        self
    }

    pub fn total_calls(&self) -> usize {
        self.observed.len() + self.committed.len()
    }
}

impl<G: VmGateway> VmGateway for ScriptedGateway<G> {
    fn observe(&mut self, ctx: &Context, call: &ContractCall) -> Result<CallOutput, VmError> {
        self.observed.push(call.clone());
        match &self.observe {
            Script::Delegate => self.inner.observe(ctx, call),
            Script::Respond(output) => Ok(output.clone()),
            Script::Fail(err) => Err(err.clone()),
        }
    }

    fn commit(&mut self, ctx: &Context, call: &ContractCall) -> Result<CallOutput, VmError> {
        self.committed.push(call.clone());
        match &self.commit {
            Script::Delegate => self.inner.commit(ctx, call),
            Script::Respond(output) => Ok(output.clone()),
            Script::Fail(err) => Err(err.clone()),
        }
    }
}

/// Registry over a fixed set of coins that counts lookups.
#[derive(Default)]
pub struct CountingRegistry {
    pub coins: Vec<ForeignCoin>,
    pub lookups: Cell<usize>,
}

impl CountingRegistry {
    pub fn with_coin(coin: ForeignCoin) -> Self {
        Self {
            coins: vec![coin],
            lookups: Cell::new(0),
        }
    }
}

impl ForeignCoinLookup for CountingRegistry {
    fn foreign_coin(&self, address: &ChainAddress) -> Option<ForeignCoin> {
        self.lookups.set(self.lookups.get() + 1);
        self.coins
            .iter()
            .find(|c| c.contract_address == *address)
            .cloned()
    }
}
