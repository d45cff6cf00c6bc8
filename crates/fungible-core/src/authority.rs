//! Admin policy and module account resolution.

use fungible_admin_types::{AccountId, ChainAddress, ADDRESS_LENGTH};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::store::{KvStore, PrefixStore};

pub const ADMIN_POLICY_PREFIX: &[u8] = b"AdminPolicy-value-";

const FUNGIBLE_ADMIN_KEY: &[u8] = b"fungible";

/// Answers who may perform privileged fungible operations.
///
/// `None` means no admin is configured, and nobody is authorized.
pub trait AdminLookup {
    fn admin(&self) -> Option<AccountId>;
}

impl<F> AdminLookup for F
where
    F: Fn() -> Option<AccountId>,
{
    fn admin(&self) -> Option<AccountId> {
        self()
    }
}

/// Admin policy kept in the ledger store.
#[derive(Debug, Clone)]
pub struct AdminPolicyStore<S> {
    store: PrefixStore<S>,
}

impl<S: KvStore> AdminPolicyStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: PrefixStore::new(store, ADMIN_POLICY_PREFIX),
        }
    }

    pub fn set_admin(&self, admin: &AccountId) {
        self.store
            .set(FUNGIBLE_ADMIN_KEY, admin.as_str().as_bytes().to_vec());
    }

    pub fn clear_admin(&self) {
        self.store.delete(FUNGIBLE_ADMIN_KEY);
    }
}

impl<S: KvStore> AdminLookup for AdminPolicyStore<S> {
    fn admin(&self) -> Option<AccountId> {
        let bytes = self.store.get(FUNGIBLE_ADMIN_KEY)?;
        let parsed = String::from_utf8(bytes)
            .map_err(|e| e.to_string())
            .and_then(|s| AccountId::new(s).map_err(|e| e.to_string()));
        match parsed {
            Ok(admin) => Some(admin),
            Err(e) => {
                warn!(error = %e, "unreadable admin policy, treating as unset");
                None
            }
        }
    }
}

/// Account address of a named module: the first 20 bytes of SHA-256 over
/// the module name.
pub fn module_address(module_name: &str) -> ChainAddress {
    let digest = Sha256::digest(module_name.as_bytes());
    let mut bytes = [0u8; ADDRESS_LENGTH];
    bytes.copy_from_slice(&digest[..ADDRESS_LENGTH]);
    ChainAddress::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_admin_roundtrip_and_clear() {
        let policy = AdminPolicyStore::new(MemoryStore::new());
        assert!(policy.admin().is_none());

        let admin = AccountId::new("zeta1admin").unwrap();
        policy.set_admin(&admin);
        assert_eq!(policy.admin(), Some(admin));

        policy.clear_admin();
        assert!(policy.admin().is_none());
    }

    #[test]
    fn test_closure_lookup() {
        let admin = AccountId::new("alice").unwrap();
        let lookup = || Some(admin.clone());
        assert_eq!(lookup.admin(), Some(admin.clone()));

        let nobody = || -> Option<AccountId> { None };
        assert!(AdminLookup::admin(&nobody).is_none());
    }

    #[test]
    fn test_module_address_is_stable_and_distinct() {
        assert_eq!(module_address("fungible"), module_address("fungible"));
        assert_ne!(module_address("fungible"), module_address("crosschain"));
        assert!(!module_address("fungible").is_zero());
    }
}
