//! Fungible module keeper.
//!
//! Owns the ledger store handle and the VM gateway and exposes the module's
//! operations over them. All record accessors are thin wrappers over the
//! typed stores in [`registry`](crate::registry),
//! [`authority`](crate::authority) and [`flags`](crate::flags).

use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use fungible_admin_types::{AccountId, ChainAddress, ForeignCoin, PermissionFlags, U256};
use tracing::info;

use crate::authority::{AdminLookup, AdminPolicyStore};
use crate::config::FungibleConfig;
use crate::context::{CoinDeployedEvent, Context, ModuleEvent};
use crate::errors::FungibleError;
use crate::fee::{FeeUpdateOutcome, FeeUpdateRequest, FeeUpdater};
use crate::flags::PermissionFlagsStore;
use crate::registry::{ForeignCoinLookup, ForeignCoinStore};
use crate::store::{KvStore, MemoryStore};
use crate::vm::{LocalVm, VmGateway, WrappedAssetProgram};

pub struct FungibleKeeper<S, G> {
    store: S,
    gateway: G,
    config: FungibleConfig,
}

impl<S: KvStore + Clone, G: VmGateway> FungibleKeeper<S, G> {
    pub fn new(store: S, gateway: G, config: FungibleConfig) -> Self {
        Self {
            store,
            gateway,
            config,
        }
    }

    pub fn config(&self) -> &FungibleConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    fn admins(&self) -> AdminPolicyStore<S> {
        AdminPolicyStore::new(self.store.clone())
    }

    fn coins(&self) -> ForeignCoinStore<S> {
        ForeignCoinStore::new(self.store.clone())
    }

    fn flags(&self) -> PermissionFlagsStore<S> {
        PermissionFlagsStore::new(self.store.clone())
    }

    // ========================================================================
    // Admin policy
    // ========================================================================

    pub fn set_admin(&self, admin: &AccountId) {
        self.admins().set_admin(admin);
        info!(admin = %admin, "fungible admin set");
    }

    pub fn remove_admin(&self) {
        self.admins().clear_admin();
        info!("fungible admin cleared");
    }

    pub fn admin(&self) -> Option<AccountId> {
        self.admins().admin()
    }

    // ========================================================================
    // Foreign coin registry
    // ========================================================================

    pub fn set_foreign_coin(&self, coin: &ForeignCoin) -> Result<(), FungibleError> {
        self.coins().set(coin)
    }

    pub fn foreign_coin(&self, address: &ChainAddress) -> Option<ForeignCoin> {
        self.coins().foreign_coin(address)
    }

    pub fn remove_foreign_coin(&self, address: &ChainAddress) {
        self.coins().remove(address)
    }

    pub fn foreign_coins(&self) -> Result<Vec<ForeignCoin>, FungibleError> {
        self.coins().list()
    }

    // ========================================================================
    // Permission flags
    // ========================================================================

    pub fn permission_flags(&self) -> Result<Option<PermissionFlags>, FungibleError> {
        self.flags().get()
    }

    pub fn set_permission_flags(&self, flags: PermissionFlags) -> Result<(), FungibleError> {
        self.flags().set(flags)
    }

    pub fn remove_permission_flags(&self) {
        self.flags().remove()
    }

    pub fn is_inbound_enabled(&self) -> Result<bool, FungibleError> {
        self.flags().is_inbound_enabled()
    }

    pub fn is_outbound_allowed(&self) -> Result<bool, FungibleError> {
        self.flags().is_outbound_allowed()
    }

    pub fn disable_inbound_only(&self) -> Result<PermissionFlags, FungibleError> {
        self.flags().disable_inbound_only()
    }

    // ========================================================================
    // Protocol fee
    // ========================================================================

    pub fn query_protocol_flat_fee(
        &mut self,
        ctx: &Context,
        contract: &ChainAddress,
    ) -> Result<U256, FungibleError> {
        let admins = self.admins();
        let coins = self.coins();
        FeeUpdater::new(&admins, &coins, &mut self.gateway, &self.config)
            .query_protocol_flat_fee(ctx, contract)
    }

    /// Replace the protocol flat fee of a registered wrapped asset.
    pub fn update_withdraw_fee(
        &mut self,
        ctx: &mut Context,
        request: &FeeUpdateRequest,
    ) -> Result<FeeUpdateOutcome, FungibleError> {
        let admins = self.admins();
        let coins = self.coins();
        FeeUpdater::new(&admins, &coins, &mut self.gateway, &self.config).update_fee(ctx, request)
    }
}

impl FungibleKeeper<MemoryStore, LocalVm<MemoryStore>> {
    /// Keeper over a fresh in-memory store and a local VM sharing it.
    pub fn local(config: FungibleConfig) -> Self {
        let store = MemoryStore::new();
        Self::local_with_store(store, config)
    }

    /// Keeper over an existing store, e.g. one restored from disk.
    pub fn local_with_store(store: MemoryStore, config: FungibleConfig) -> Self {
        let vm = LocalVm::new(store.clone())
            .with_gas_schedule(config.gas_schedule)
            .with_default_gas_limit(config.call_gas_limit);
        Self::new(store, vm, config)
    }
}

impl<S: KvStore + Clone> FungibleKeeper<S, LocalVm<S>> {
    /// Deploy a wrapped-asset contract for `coin` and register it.
    pub fn deploy_wrapped_asset(
        &mut self,
        ctx: &mut Context,
        coin: ForeignCoin,
        initial_fee: U256,
    ) -> Result<()> {
        let address = coin.contract_address;
        if self.foreign_coin(&address).is_some() {
            bail!("foreign coin already registered at {}", address);
        }
        if let Some(existing) = self.coins().find_by_asset(&coin.asset, coin.foreign_chain_id)? {
            bail!(
                "chain {} already has a coin for asset '{}' at {}",
                coin.foreign_chain_id,
                coin.asset,
                existing.contract_address
            );
        }

        let program = WrappedAssetProgram::new(self.config.module_address);
        self.gateway
            .deploy(
                address,
                Arc::new(program),
                WrappedAssetProgram::initial_storage(&coin, initial_fee),
            )
            .with_context(|| format!("failed to deploy wrapped asset {}", coin.symbol))?;
        self.set_foreign_coin(&coin)?;

        ctx.emit(ModuleEvent::CoinDeployed(CoinDeployedEvent {
            chain_id: coin.foreign_chain_id,
            coin_type: coin.coin_type,
            contract: address,
            symbol: coin.symbol.clone(),
            block_height: ctx.block_height(),
        }));
        info!(
            contract = %address,
            symbol = %coin.symbol,
            chain_id = coin.foreign_chain_id,
            initial_fee = %initial_fee,
            "wrapped asset deployed"
        );
        Ok(())
    }
}
