//! Foreign coin registry.

use fungible_admin_types::{ChainAddress, ForeignCoin};
use tracing::warn;

use crate::errors::FungibleError;
use crate::store::{KvStore, PrefixStore};

pub const FOREIGN_COINS_PREFIX: &[u8] = b"ForeignCoins-value-";

/// Read access to registered foreign coins, keyed by contract address.
pub trait ForeignCoinLookup {
    fn foreign_coin(&self, address: &ChainAddress) -> Option<ForeignCoin>;
}

/// Registry records persisted as bcs under [`FOREIGN_COINS_PREFIX`].
#[derive(Debug, Clone)]
pub struct ForeignCoinStore<S> {
    store: PrefixStore<S>,
}

impl<S: KvStore> ForeignCoinStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: PrefixStore::new(store, FOREIGN_COINS_PREFIX),
        }
    }

    fn key(address: &ChainAddress) -> Vec<u8> {
        address.to_string().into_bytes()
    }

    /// Insert or overwrite the record for `coin.contract_address`.
    pub fn set(&self, coin: &ForeignCoin) -> Result<(), FungibleError> {
        let bytes = bcs::to_bytes(coin).map_err(FungibleError::store)?;
        self.store.set(&Self::key(&coin.contract_address), bytes);
        Ok(())
    }

    pub fn get(&self, address: &ChainAddress) -> Result<Option<ForeignCoin>, FungibleError> {
        self.store
            .get(&Self::key(address))
            .map(|bytes| decode(address, &bytes))
            .transpose()
    }

    pub fn remove(&self, address: &ChainAddress) {
        self.store.delete(&Self::key(address));
    }

    /// Every record, in address order.
    pub fn list(&self) -> Result<Vec<ForeignCoin>, FungibleError> {
        self.store
            .scan_prefix(b"")
            .into_iter()
            .map(|(key, bytes)| {
                let coin: ForeignCoin = bcs::from_bytes(&bytes).map_err(|e| {
                    FungibleError::store(format!(
                        "corrupt foreign coin record {}: {}",
                        String::from_utf8_lossy(&key),
                        e
                    ))
                })?;
                Ok(coin)
            })
            .collect()
    }

    /// Record of `asset` on `chain_id`, if any. Gas coins have an empty asset.
    pub fn find_by_asset(
        &self,
        asset: &str,
        chain_id: i64,
    ) -> Result<Option<ForeignCoin>, FungibleError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|c| c.foreign_chain_id == chain_id && c.asset.eq_ignore_ascii_case(asset)))
    }
}

fn decode(address: &ChainAddress, bytes: &[u8]) -> Result<ForeignCoin, FungibleError> {
    bcs::from_bytes(bytes).map_err(|e| {
        FungibleError::store(format!("corrupt foreign coin record {}: {}", address, e))
    })
}

impl<S: KvStore> ForeignCoinLookup for ForeignCoinStore<S> {
    fn foreign_coin(&self, address: &ChainAddress) -> Option<ForeignCoin> {
        match self.get(address) {
            Ok(coin) => coin,
            Err(e) => {
                warn!(contract = %address, error = %e, "unreadable registry record treated as absent");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use fungible_admin_types::CoinType;

    fn coin(n: u64, chain_id: i64) -> ForeignCoin {
        ForeignCoin::new(ChainAddress::from_low_u64(n), chain_id, "ETH")
    }

    #[test]
    fn test_set_get_remove() {
        let registry = ForeignCoinStore::new(MemoryStore::new());
        let eth = coin(1, 5);
        assert!(registry.foreign_coin(&eth.contract_address).is_none());

        registry.set(&eth).unwrap();
        assert_eq!(registry.foreign_coin(&eth.contract_address), Some(eth.clone()));

        registry.remove(&eth.contract_address);
        assert_eq!(registry.get(&eth.contract_address).unwrap(), None);
    }

    #[test]
    fn test_list_and_find_by_asset() {
        let registry = ForeignCoinStore::new(MemoryStore::new());
        let usdc = coin(2, 5)
            .with_coin_type(CoinType::Erc20)
            .with_asset("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
        registry.set(&coin(1, 5)).unwrap();
        registry.set(&usdc).unwrap();
        registry.set(&coin(3, 97)).unwrap();

        assert_eq!(registry.list().unwrap().len(), 3);
        let found = registry
            .find_by_asset("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48", 5)
            .unwrap();
        assert_eq!(found, Some(usdc));
        assert!(registry.find_by_asset("", 1).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_record_reads_as_absent() {
        let store = MemoryStore::new();
        let registry = ForeignCoinStore::new(store.clone());
        let addr = ChainAddress::from_low_u64(1);

        let mut key = FOREIGN_COINS_PREFIX.to_vec();
        key.extend(addr.to_string().into_bytes());
        store.set(&key, vec![0xff]);

        assert!(registry.get(&addr).is_err());
        assert!(registry.foreign_coin(&addr).is_none());
    }
}
