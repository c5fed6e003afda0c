//! # In-Memory Store
//!
//! Deterministic reference adapter for the partitioned store. `BTreeMap`
//! backing keeps iteration order stable across runs, which matters for
//! reproducing call sequences in tests.

use crate::domain::keys::StorageKey;
use crate::domain::value_objects::{Identity, StoreValue};
use crate::ports::outbound::StateStore;
use std::collections::BTreeMap;

/// Deterministic in-memory implementation of [`StateStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    global: BTreeMap<StorageKey, StoreValue>,
    local: BTreeMap<Identity, BTreeMap<StorageKey, StoreValue>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells in the global partition.
    #[must_use]
    pub fn global_len(&self) -> usize {
        self.global.len()
    }

    /// Number of cells in `identity`'s local partition.
    #[must_use]
    pub fn local_len(&self, identity: &Identity) -> usize {
        self.local.get(identity).map_or(0, BTreeMap::len)
    }
}

impl StateStore for InMemoryStore {
    fn global_get(&self, key: &StorageKey) -> Option<StoreValue> {
        self.global.get(key).cloned()
    }

    fn global_put(&mut self, key: StorageKey, value: StoreValue) {
        self.global.insert(key, value);
    }

    fn local_get(&self, identity: &Identity, key: &StorageKey) -> Option<StoreValue> {
        self.local.get(identity).and_then(|cells| cells.get(key)).cloned()
    }

    fn local_put(&mut self, identity: &Identity, key: StorageKey, value: StoreValue) {
        self.local.entry(*identity).or_default().insert(key, value);
    }

    fn local_clear(&mut self, identity: &Identity) {
        self.local.remove(identity);
    }
}

// =============================================================================
// TESTS
// =============================================================================
