//! Accounts, coins and keepers used across tests.

use std::sync::Arc;

use fungible_admin_core::vm::WrappedAssetProgram;
use fungible_admin_core::{
    Context, FeeUpdateRequest, ForeignCoinStore, FungibleConfig, FungibleKeeper, LocalVm,
    MemoryStore,
};
use fungible_admin_types::{AccountId, ChainAddress, ForeignCoin, U256};

use super::mocks::{Script, ScriptedGateway};

/// Well-formed address that is never registered.
pub const UNREGISTERED_ADDRESS: &str = "0x9fd96203f7b22bcf72d9dcb40ff98302376ce09c";

pub fn admin() -> AccountId {
    AccountId::new("zeta1admin").unwrap()
}

pub fn outsider() -> AccountId {
    AccountId::new("zeta1outsider").unwrap()
}

/// Gas coin of chain 5.
pub fn eth_coin() -> ForeignCoin {
    ForeignCoin::new(ChainAddress::from_low_u64(0xe7), 5, "ETH").with_name("Ether")
}

pub fn fee_request(caller: AccountId, contract: impl Into<String>, fee: u64) -> FeeUpdateRequest {
    FeeUpdateRequest::new(caller, contract, U256::from(fee))
}

/// Local keeper with [`admin`] configured and [`eth_coin`] deployed at fee 0.
pub fn local_keeper() -> (FungibleKeeper<MemoryStore, LocalVm<MemoryStore>>, Context) {
    let mut keeper = FungibleKeeper::local(FungibleConfig::default());
    let mut ctx = Context::new(100, 7001);
    keeper.set_admin(&admin());
    keeper
        .deploy_wrapped_asset(&mut ctx, eth_coin(), U256::zero())
        .unwrap();
    ctx.take_events();
    (keeper, ctx)
}

pub type ScriptedKeeper = FungibleKeeper<MemoryStore, ScriptedGateway<LocalVm<MemoryStore>>>;

/// Same setup as [`local_keeper`], with each VM mode scripted.
pub fn scripted_keeper(observe: Script, commit: Script) -> (ScriptedKeeper, Context) {
    let config = FungibleConfig::default();
    let store = MemoryStore::new();
    let coin = eth_coin();

    let mut vm = LocalVm::new(store.clone()).with_gas_schedule(config.gas_schedule);
    vm.deploy(
        coin.contract_address,
        Arc::new(WrappedAssetProgram::new(config.module_address)),
        WrappedAssetProgram::initial_storage(&coin, U256::zero()),
    )
    .unwrap();
    ForeignCoinStore::new(store.clone()).set(&coin).unwrap();

    let gateway = ScriptedGateway::new(vm)
        .with_observe(observe)
        .with_commit(commit);
    let keeper = FungibleKeeper::new(store, gateway, config);
    keeper.set_admin(&admin());
    (keeper, Context::new(100, 7001))
}
