//! Key-value store abstraction.
//!
//! The ledger's persistence layer is a plain byte-keyed map. Everything the
//! module keeps (registry records, the admin policy, permission flags and
//! contract storage owned by the local VM) goes through [`KvStore`], usually
//! behind a [`PrefixStore`] so that each concern owns a key namespace.
//!
//! Handles take `&self` for writes: a store handle is shared by several
//! accessors inside one state transition, the same way a ledger context hands
//! the same store to every keeper.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use sha2::{Digest, Sha256};

/// Byte-keyed storage with ordered iteration.
pub trait KvStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// Insert or overwrite the value stored under `key`.
    fn set(&self, key: &[u8], value: Vec<u8>);

    /// Remove `key`. Removing an absent key is a no-op.
    fn delete(&self, key: &[u8]);

    /// All entries whose key starts with `prefix`, in key order.
    fn scan_prefix(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)>;

    fn has(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        (**self).get(key)
    }

    fn set(&self, key: &[u8], value: Vec<u8>) {
        (**self).set(key, value)
    }

    fn delete(&self, key: &[u8]) {
        (**self).delete(key)
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        (**self).scan_prefix(prefix)
    }
}

/// In-memory store. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<BTreeMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `entries`.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Vec<u8>, Vec<u8>)>,
    {
        Self {
            entries: Arc::new(RwLock::new(entries.into_iter().collect())),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Copy of every entry, in key order.
    pub fn entries(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// SHA-256 over every (key, value) pair in key order.
    ///
    /// Two stores have equal digests iff they hold the same entries, which
    /// makes this the cheapest way to assert that an operation left state
    /// untouched.
    pub fn state_digest(&self) -> [u8; 32] {
        let entries = self.entries.read();
        let mut hasher = Sha256::new();
        for (key, value) in entries.iter() {
            hasher.update((key.len() as u64).to_be_bytes());
            hasher.update(key);
            hasher.update((value.len() as u64).to_be_bytes());
            hasher.update(value);
        }
        hasher.finalize().into()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &[u8], value: Vec<u8>) {
        self.entries.write().insert(key.to_vec(), value);
    }

    fn delete(&self, key: &[u8]) {
        self.entries.write().remove(key);
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.entries
            .read()
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// A view of another store restricted to keys under a fixed prefix.
///
/// Keys passed in and returned from [`KvStore::scan_prefix`] are relative to
/// the prefix.
#[derive(Debug, Clone)]
pub struct PrefixStore<S> {
    inner: S,
    prefix: Vec<u8>,
}

impl<S: KvStore> PrefixStore<S> {
    pub fn new(inner: S, prefix: impl Into<Vec<u8>>) -> Self {
        Self {
            inner,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    fn full_key(&self, key: &[u8]) -> Vec<u8> {
        let mut full = Vec::with_capacity(self.prefix.len() + key.len());
        full.extend_from_slice(&self.prefix);
        full.extend_from_slice(key);
        full
    }
}

impl<S: KvStore> KvStore for PrefixStore<S> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.inner.get(&self.full_key(key))
    }

    fn set(&self, key: &[u8], value: Vec<u8>) {
        self.inner.set(&self.full_key(key), value)
    }

    fn delete(&self, key: &[u8]) {
        self.inner.delete(&self.full_key(key))
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        let strip = self.prefix.len();
        self.inner
            .scan_prefix(&self.full_key(prefix))
            .into_iter()
            .map(|(k, v)| (k[strip..].to_vec(), v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_basic_ops() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set(b"a", vec![1]);
        assert_eq!(store.get(b"a"), Some(vec![1]));
        assert!(store.has(b"a"));

        store.set(b"a", vec![2]);
        assert_eq!(store.get(b"a"), Some(vec![2]));

        store.delete(b"a");
        store.delete(b"missing");
        assert_eq!(store.get(b"a"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();
        handle.set(b"k", vec![7]);
        assert_eq!(store.get(b"k"), Some(vec![7]));
    }

    #[test]
    fn test_scan_prefix_is_ordered_and_bounded() {
        let store = MemoryStore::new();
        store.set(b"coin/b", vec![2]);
        store.set(b"coin/a", vec![1]);
        store.set(b"coio", vec![9]);
        store.set(b"admin", vec![0]);

        let keys: Vec<_> = store
            .scan_prefix(b"coin/")
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec![b"coin/a".to_vec(), b"coin/b".to_vec()]);
    }

    #[test]
    fn test_prefix_store_isolates_namespaces() {
        let store = MemoryStore::new();
        let left = PrefixStore::new(store.clone(), b"left/".to_vec());
        let right = PrefixStore::new(store.clone(), b"right/".to_vec());

        left.set(b"x", vec![1]);
        right.set(b"x", vec![2]);

        assert_eq!(left.get(b"x"), Some(vec![1]));
        assert_eq!(right.get(b"x"), Some(vec![2]));
        assert_eq!(store.get(b"left/x"), Some(vec![1]));
        assert_eq!(left.scan_prefix(b""), vec![(b"x".to_vec(), vec![1])]);
    }

    #[test]
    fn test_state_digest_tracks_content() {
        let a = MemoryStore::new();
        let b = MemoryStore::new();
        assert_eq!(a.state_digest(), b.state_digest());

        a.set(b"fee", vec![0]);
        assert_ne!(a.state_digest(), b.state_digest());

        b.set(b"fee", vec![0]);
        assert_eq!(a.state_digest(), b.state_digest());

        // Key/value boundaries matter
        let c = MemoryStore::from_entries(vec![(b"ab".to_vec(), b"c".to_vec())]);
        let d = MemoryStore::from_entries(vec![(b"a".to_vec(), b"bc".to_vec())]);
        assert_ne!(c.state_digest(), d.state_digest());
    }
}
