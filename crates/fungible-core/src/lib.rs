//! Fungible module engine.
//!
//! Administration of wrapped foreign assets: the registry of onboarded
//! coins, the admin policy, the observer permission flags and, at the
//! centre, the privileged protocol fee update.
//!
//! ## Architecture
//!
//! ```text
//! FungibleKeeper
//!   ├── AdminPolicyStore      (authority)   who may update fees
//!   ├── ForeignCoinStore      (registry)    contract address → ForeignCoin
//!   ├── PermissionFlagsStore  (flags)       inbound/outbound switches
//!   └── VmGateway             (vm)          observe / commit contract calls
//!          └── LocalVm → WrappedAssetProgram
//! ```
//!
//! Everything persists in one [`KvStore`](store::KvStore); each concern owns
//! a key prefix.
//!
//! ## Example
//!
//! ```
//! use fungible_admin_core::{Context, FeeUpdateRequest, FungibleConfig, FungibleKeeper};
//! use fungible_admin_types::{AccountId, ChainAddress, ForeignCoin, U256};
//!
//! let mut keeper = FungibleKeeper::local(FungibleConfig::default());
//! let mut ctx = Context::new(1, 7001);
//! let admin = AccountId::new("admin").unwrap();
//! keeper.set_admin(&admin);
//!
//! let coin = ForeignCoin::new(ChainAddress::from_low_u64(0x1001), 5, "ETH");
//! keeper.deploy_wrapped_asset(&mut ctx, coin.clone(), U256::zero()).unwrap();
//!
//! let request = FeeUpdateRequest::new(admin, coin.contract_address.to_string(), U256::from(42u64));
//! keeper.update_withdraw_fee(&mut ctx, &request).unwrap();
//!
//! let fee = keeper.query_protocol_flat_fee(&ctx, &coin.contract_address).unwrap();
//! assert_eq!(fee, U256::from(42u64));
//! ```

pub mod abi;
pub mod authority;
pub mod config;
pub mod context;
pub mod errors;
pub mod fee;
pub mod flags;
pub mod keeper;
pub mod registry;
pub mod store;
pub mod vm;

pub use authority::{module_address, AdminLookup, AdminPolicyStore};
pub use config::{FungibleConfig, MODULE_NAME};
pub use context::{CoinDeployedEvent, Context, FeeUpdatedEvent, ModuleEvent};
pub use errors::{CallFailure, CallPhase, ErrorKind, FungibleError};
pub use fee::{FeeUpdateOutcome, FeeUpdateRequest, FeeUpdater};
pub use flags::PermissionFlagsStore;
pub use keeper::FungibleKeeper;
pub use registry::{ForeignCoinLookup, ForeignCoinStore};
pub use store::{KvStore, MemoryStore, PrefixStore};
pub use vm::{CallOutput, ContractCall, LocalVm, VmError, VmGateway};
