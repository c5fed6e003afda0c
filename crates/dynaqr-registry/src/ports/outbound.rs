//! # Driven Ports (Outbound)
//!
//! The storage interface the transition logic depends on. The surrounding
//! execution environment owns the real store; adapters implement this trait
//! to expose it. Two partitions exist: a single shared *global* partition and
//! one *local* sub-partition per identity.
//!
//! Reads of absent cells return `None`; the typed helpers fold that into the
//! zero value of the requested type, which is the cell model the transition
//! logic is written against.

use crate::domain::keys::StorageKey;
use crate::domain::value_objects::{Identity, StoreValue};

/// Partitioned key-value storage.
///
/// Writes only ever happen through a validated [`StoreDelta`], applied after
/// the whole call has succeeded; the transition logic itself takes `&impl
/// StateStore` and cannot write.
///
/// [`StoreDelta`]: crate::domain::delta::StoreDelta
pub trait StateStore {
    /// Reads a cell from the global partition.
    fn global_get(&self, key: &StorageKey) -> Option<StoreValue>;

    /// Writes a cell in the global partition.
    fn global_put(&mut self, key: StorageKey, value: StoreValue);

    /// Reads a cell from `identity`'s local partition.
    fn local_get(&self, identity: &Identity, key: &StorageKey) -> Option<StoreValue>;

    /// Writes a cell in `identity`'s local partition.
    fn local_put(&mut self, identity: &Identity, key: StorageKey, value: StoreValue);

    /// Drops `identity`'s entire local partition.
    fn local_clear(&mut self, identity: &Identity);

    /// Reads a global scalar cell; absent or byte-typed cells read as 0.
    fn global_uint(&self, key: &StorageKey) -> u64 {
        self.global_get(key).and_then(|v| v.as_uint()).unwrap_or(0)
    }

    /// Reads a global byte-string cell; absent or scalar cells read as empty.
    fn global_bytes(&self, key: &StorageKey) -> Vec<u8> {
        self.global_get(key)
            .and_then(|v| v.as_bytes().map(<[u8]>::to_vec))
            .unwrap_or_default()
    }

    /// Reads a local scalar cell; absent or byte-typed cells read as 0.
    fn local_uint(&self, identity: &Identity, key: &StorageKey) -> u64 {
        self.local_get(identity, key)
            .and_then(|v| v.as_uint())
            .unwrap_or(0)
    }
}
