//! Session state management for fungible-admin
//!
//! The whole ledger store is written to a JSON file after every successful
//! command and read back on the next invocation.

use anyhow::{anyhow, bail, Context, Result};
use base64::Engine;
use fungible_admin_core::vm::{WrappedAssetProgram, WRAPPED_ASSET_KIND};
use fungible_admin_core::{FungibleConfig, FungibleKeeper, LocalVm, MemoryStore};
use fungible_admin_types::ChainAddress;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Chain id the local session pretends to run on.
pub const LOCAL_CHAIN_ID: i64 = 7001;

pub type LocalKeeper = FungibleKeeper<MemoryStore, LocalVm<MemoryStore>>;

/// Serializable state that can be persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PersistedState {
    /// Store key (hex) -> value (base64)
    pub entries: BTreeMap<String, String>,
    /// Contracts whose programs must be re-registered on load
    pub contracts: Vec<DeployedContract>,
    /// Height of the last executed command
    pub block_height: u64,
    pub chain_id: i64,
    /// Session metadata
    pub metadata: SessionMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: ChainAddress,
    pub kind: String,
    pub module_address: ChainAddress,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionMetadata {
    pub created_at: Option<String>,
    pub last_modified: Option<String>,
}

/// Runtime session state (in-memory)
pub struct AdminState {
    pub keeper: LocalKeeper,
    /// Persisted state for save/load
    pub persisted: PersistedState,
    /// Whether state has been modified
    pub dirty: bool,
}

/// `~/.fungible-admin/state.json`, or `./.fungible-admin/state.json` without a home.
pub fn default_state_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".fungible-admin")
        .join("state.json")
}

impl AdminState {
    /// Create a new empty session
    pub fn new(config: FungibleConfig) -> Self {
        Self {
            keeper: FungibleKeeper::local(config),
            persisted: PersistedState {
                chain_id: LOCAL_CHAIN_ID,
                metadata: SessionMetadata {
                    created_at: Some(chrono::Utc::now().to_rfc3339()),
                    last_modified: None,
                },
                ..Default::default()
            },
            dirty: false,
        }
    }

    /// Load state from file or create new if not exists
    pub fn load_or_create(path: &Path, config: FungibleConfig) -> Result<Self> {
        if path.exists() {
            Self::load(path, config)
        } else {
            Ok(Self::new(config))
        }
    }

    /// Load state from a file
    pub fn load(path: &Path, config: FungibleConfig) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file {}", path.display()))?;
        let persisted: PersistedState =
            serde_json::from_str(&data).context("Failed to deserialize state")?;

        let engine = base64::engine::general_purpose::STANDARD;
        let entries = persisted
            .entries
            .iter()
            .map(|(key, value)| {
                let key = hex::decode(key).with_context(|| format!("Invalid state key '{}'", key))?;
                let value = engine
                    .decode(value)
                    .map_err(|e| anyhow!("Invalid state value for key {}: {}", hex::encode(&key), e))?;
                Ok((key, value))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut keeper = FungibleKeeper::local_with_store(MemoryStore::from_entries(entries), config);
        for contract in &persisted.contracts {
            match contract.kind.as_str() {
                WRAPPED_ASSET_KIND => keeper.gateway_mut().register_program(
                    contract.address,
                    Arc::new(WrappedAssetProgram::new(contract.module_address)),
                ),
                other => bail!(
                    "Unknown program kind '{}' for contract {}",
                    other,
                    contract.address
                ),
            }
        }

        debug!(
            path = %path.display(),
            contracts = persisted.contracts.len(),
            block_height = persisted.block_height,
            "loaded session state"
        );
        Ok(Self {
            keeper,
            persisted,
            dirty: false,
        })
    }

    /// Save state to a file
    pub fn save(&mut self, path: &Path) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let engine = base64::engine::general_purpose::STANDARD;
        self.persisted.entries = self
            .keeper
            .store()
            .entries()
            .into_iter()
            .map(|(key, value)| (hex::encode(key), engine.encode(value)))
            .collect();
        self.persisted.metadata.last_modified = Some(chrono::Utc::now().to_rfc3339());

        let data =
            serde_json::to_string_pretty(&self.persisted).context("Failed to serialize state")?;
        std::fs::write(path, data)
            .with_context(|| format!("Failed to write state file {}", path.display()))?;
        self.dirty = false;
        debug!(path = %path.display(), entries = self.persisted.entries.len(), "saved session state");
        Ok(())
    }

    /// Context for the next state-changing command.
    pub fn next_context(&mut self) -> fungible_admin_core::Context {
        self.persisted.block_height += 1;
        self.dirty = true;
        fungible_admin_core::Context::new(self.persisted.block_height, self.persisted.chain_id)
    }

    /// Context for read-only commands.
    pub fn read_context(&self) -> fungible_admin_core::Context {
        fungible_admin_core::Context::new(self.persisted.block_height, self.persisted.chain_id)
    }

    /// Remember a deployment so its program is restored on load.
    pub fn record_deployment(&mut self, address: ChainAddress) {
        self.persisted.contracts.push(DeployedContract {
            address,
            kind: WRAPPED_ASSET_KIND.to_string(),
            module_address: self.keeper.config().module_address,
        });
        self.dirty = true;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fungible_admin_core::FeeUpdateRequest;
    use fungible_admin_types::{AccountId, ForeignCoin, U256};
    use tempfile::tempdir;

    #[test]
    fn test_new_state() {
        let state = AdminState::new(FungibleConfig::default());
        assert!(state.keeper.store().is_empty());
        assert!(state.persisted.metadata.created_at.is_some());
        assert_eq!(state.persisted.chain_id, LOCAL_CHAIN_ID);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let admin = AccountId::new("admin").unwrap();
        let coin = ForeignCoin::new(ChainAddress::from_low_u64(0x1001), 5, "ETH");

        let mut state = AdminState::new(FungibleConfig::default());
        state.keeper.set_admin(&admin);
        let mut ctx = state.next_context();
        state
            .keeper
            .deploy_wrapped_asset(&mut ctx, coin.clone(), U256::from(3u64))
            .unwrap();
        state.record_deployment(coin.contract_address);
        state.save(&path).unwrap();

        let mut loaded = AdminState::load(&path, FungibleConfig::default()).unwrap();
        assert_eq!(loaded.keeper.admin(), Some(admin.clone()));
        assert_eq!(loaded.persisted.block_height, 1);
        assert_eq!(
            loaded.keeper.store().state_digest(),
            state.keeper.store().state_digest()
        );

        // The restored program still answers and accepts updates
        let mut ctx = loaded.next_context();
        let request =
            FeeUpdateRequest::new(admin, coin.contract_address.to_string(), U256::from(42u64));
        let outcome = loaded.keeper.update_withdraw_fee(&mut ctx, &request).unwrap();
        assert_eq!(outcome.previous_fee, U256::from(3u64));
    }

    #[test]
    fn test_load_rejects_unknown_program() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let persisted = PersistedState {
            contracts: vec![DeployedContract {
                address: ChainAddress::from_low_u64(1),
                kind: "mystery".to_string(),
                module_address: ChainAddress::from_low_u64(2),
            }],
            ..Default::default()
        };
        std::fs::write(&path, serde_json::to_string(&persisted).unwrap()).unwrap();

        let err = AdminState::load(&path, FungibleConfig::default()).err().unwrap();
        assert!(err.to_string().contains("mystery"));
    }

    #[test]
    fn test_load_or_create_new() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let state = AdminState::load_or_create(&path, FungibleConfig::default()).unwrap();
        assert!(state.persisted.contracts.is_empty());
    }
}
