//! # Transition Engine
//!
//! The executable half of the core: guard predicates, the lifecycle
//! operations, the two-level dispatcher, and the typed read views. Every
//! function here takes the store read-only and describes its writes as a
//! [`StoreDelta`](crate::domain::delta::StoreDelta); `apply_delta` is the
//! single write path.

pub mod dispatch;
pub mod guards;
pub mod operations;
pub mod view;

use crate::domain::delta::{StoreDelta, WriteOp};
use crate::ports::outbound::StateStore;

pub use dispatch::dispatch;

/// Commits a validated delta to the store, in order, in full.
///
/// Callers validate first (guards, partition check); by the time a delta
/// reaches this function the whole call has already succeeded.
pub fn apply_delta<S: StateStore>(store: &mut S, delta: &StoreDelta) {
    for write in delta.writes() {
        match write {
            WriteOp::Global { key, value } => store.global_put(key.clone(), value.clone()),
            WriteOp::Local { owner, key, value } => {
                store.local_put(owner, key.clone(), value.clone());
            }
            WriteOp::ClearLocal { owner } => store.local_clear(owner),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
