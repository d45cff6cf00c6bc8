//! Permission flags of the observer module.
//!
//! A single record holds both switches. Reads treat a missing record as
//! both directions disabled.

use fungible_admin_types::PermissionFlags;
use tracing::debug;

use crate::errors::FungibleError;
use crate::store::{KvStore, PrefixStore};

pub const PERMISSION_FLAGS_PREFIX: &[u8] = b"PermissionFlags-value-";

const PERMISSION_FLAGS_KEY: &[u8] = &[0];

#[derive(Debug, Clone)]
pub struct PermissionFlagsStore<S> {
    store: PrefixStore<S>,
}

impl<S: KvStore> PermissionFlagsStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: PrefixStore::new(store, PERMISSION_FLAGS_PREFIX),
        }
    }

    pub fn set(&self, flags: PermissionFlags) -> Result<(), FungibleError> {
        let bytes = bcs::to_bytes(&flags).map_err(FungibleError::store)?;
        self.store.set(PERMISSION_FLAGS_KEY, bytes);
        Ok(())
    }

    pub fn get(&self) -> Result<Option<PermissionFlags>, FungibleError> {
        self.store
            .get(PERMISSION_FLAGS_KEY)
            .map(|bytes| {
                bcs::from_bytes(&bytes).map_err(|e| {
                    FungibleError::store(format!("corrupt permission flags: {}", e))
                })
            })
            .transpose()
    }

    pub fn remove(&self) {
        self.store.delete(PERMISSION_FLAGS_KEY);
    }

    pub fn is_inbound_enabled(&self) -> Result<bool, FungibleError> {
        Ok(self.get()?.is_some_and(|f| f.is_inbound_enabled))
    }

    pub fn is_outbound_allowed(&self) -> Result<bool, FungibleError> {
        Ok(self.get()?.is_some_and(|f| f.is_outbound_enabled))
    }

    /// Turn inbound off while keeping outbound as it was. An absent record
    /// becomes inbound off, outbound on.
    pub fn disable_inbound_only(&self) -> Result<PermissionFlags, FungibleError> {
        let flags = match self.get()? {
            Some(existing) => PermissionFlags::new(false, existing.is_outbound_enabled),
            None => PermissionFlags::new(false, true),
        };
        self.set(flags)?;
        debug!(outbound = flags.is_outbound_enabled, "inbound disabled");
        Ok(flags)
    }
}
