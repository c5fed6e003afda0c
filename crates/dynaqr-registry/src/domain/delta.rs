//! # Store Delta
//!
//! The explicit write-set an operation returns. Operations are pure: they
//! read the store and describe their writes; nothing is committed until the
//! whole call has validated. Applying a delta after a successful call is the
//! only write path, which gives abort-implies-no-effect without relying on a
//! store-wide rollback mechanism.

use crate::domain::keys::StorageKey;
use crate::domain::value_objects::{Identity, StoreValue};
use crate::errors::AuthorizationError;

// =============================================================================
// WRITE OPS
// =============================================================================

/// One pending write against the partitioned store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Put a cell in the global partition.
    Global {
        /// Target key.
        key: StorageKey,
        /// New cell value.
        value: StoreValue,
    },
    /// Put a cell in one identity's local partition.
    Local {
        /// Partition owner. Must be the calling identity.
        owner: Identity,
        /// Target key.
        key: StorageKey,
        /// New cell value.
        value: StoreValue,
    },
    /// Drop one identity's entire local partition.
    ClearLocal {
        /// Partition owner. Must be the calling identity.
        owner: Identity,
    },
}

// =============================================================================
// STORE DELTA
// =============================================================================

/// An ordered list of pending writes, applied all-or-nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreDelta {
    writes: Vec<WriteOp>,
}

impl StoreDelta {
    /// Creates an empty delta.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a global-partition put.
    pub fn put_global(&mut self, key: StorageKey, value: impl Into<StoreValue>) {
        self.writes.push(WriteOp::Global {
            key,
            value: value.into(),
        });
    }

    /// Queues a local-partition put for `owner`.
    pub fn put_local(&mut self, owner: Identity, key: StorageKey, value: impl Into<StoreValue>) {
        self.writes.push(WriteOp::Local {
            owner,
            key,
            value: value.into(),
        });
    }

    /// Queues dropping `owner`'s entire local partition.
    pub fn clear_local(&mut self, owner: Identity) {
        self.writes.push(WriteOp::ClearLocal { owner });
    }

    /// Returns the pending writes in application order.
    #[must_use]
    pub fn writes(&self) -> &[WriteOp] {
        &self.writes
    }

    /// Returns the number of pending writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Returns true if the delta commits nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Validates per-identity write isolation: every local write must target
    /// the calling identity's own partition.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::ForeignPartitionWrite`] if any local
    /// write targets another identity's partition.
    pub fn check_partition(&self, caller: &Identity) -> Result<(), AuthorizationError> {
        for write in &self.writes {
            let owner = match write {
                WriteOp::Global { .. } => continue,
                WriteOp::Local { owner, .. } | WriteOp::ClearLocal { owner } => owner,
            };
            if owner != caller {
                return Err(AuthorizationError::ForeignPartitionWrite);
            }
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
