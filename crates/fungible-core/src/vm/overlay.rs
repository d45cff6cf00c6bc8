//! Buffered writes on top of a read-only store.

use std::collections::BTreeMap;

use crate::store::KvStore;

/// Collects the writes of one call without touching the underlying store.
///
/// Reads see the call's own pending writes first, then the base store.
/// [`WriteOverlay::apply`] flushes the pending writes; dropping the overlay
/// discards them.
pub struct WriteOverlay<'a> {
    base: &'a dyn KvStore,
    /// `None` marks a deletion
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a> WriteOverlay<'a> {
    pub fn new(base: &'a dyn KvStore) -> Self {
        Self {
            base,
            writes: BTreeMap::new(),
        }
    }

    pub fn read(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.writes.get(key) {
            Some(pending) => pending.clone(),
            None => self.base.get(key),
        }
    }

    pub fn write(&mut self, key: &[u8], value: Vec<u8>) {
        self.writes.insert(key.to_vec(), Some(value));
    }

    pub fn remove(&mut self, key: &[u8]) {
        self.writes.insert(key.to_vec(), None);
    }

    /// Number of keys with a pending write or deletion.
    pub fn pending(&self) -> usize {
        self.writes.len()
    }

    pub fn is_dirty(&self) -> bool {
        !self.writes.is_empty()
    }

    /// Flush pending writes into the base store. Returns how many keys
    /// were touched.
    pub fn apply(self) -> usize {
        let touched = self.writes.len();
        for (key, value) in self.writes {
            match value {
                Some(value) => self.base.set(&key, value),
                None => self.base.delete(&key),
            }
        }
        touched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_reads_see_pending_writes() {
        let store = MemoryStore::new();
        store.set(b"a", vec![1]);
        store.set(b"b", vec![2]);

        let mut overlay = WriteOverlay::new(&store);
        overlay.write(b"a", vec![9]);
        overlay.remove(b"b");

        assert_eq!(overlay.read(b"a"), Some(vec![9]));
        assert_eq!(overlay.read(b"b"), None);
        // Base untouched until apply
        assert_eq!(store.get(b"a"), Some(vec![1]));
        assert_eq!(store.get(b"b"), Some(vec![2]));
    }

    #[test]
    fn test_apply_and_discard() {
        let store = MemoryStore::new();
        store.set(b"gone", vec![0]);

        {
            let mut overlay = WriteOverlay::new(&store);
            overlay.write(b"x", vec![1]);
        }
        assert!(store.get(b"x").is_none());

        let mut overlay = WriteOverlay::new(&store);
        overlay.write(b"x", vec![1]);
        overlay.remove(b"gone");
        assert!(overlay.is_dirty());
        assert_eq!(overlay.apply(), 2);

        assert_eq!(store.get(b"x"), Some(vec![1]));
        assert!(store.get(b"gone").is_none());
    }
}
