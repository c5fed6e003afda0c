//! # Guard Predicates
//!
//! Pure read-only checks gating every mutation. All guards an operation
//! needs are evaluated before its first write is queued; a failed guard
//! aborts the call with nothing committed.
//!
//! Absent cells read as zero values, so every guard degrades safely on an
//! event that was never created: ownership never matches, activity reads
//! false, registration reads none.

use crate::domain::keys::{event_key, registration_key, EventField, RegistrationField};
use crate::domain::value_objects::{EventId, Identity};
use crate::ports::outbound::StateStore;

/// True when `caller` is the recorded owner of the event.
#[must_use]
pub fn is_owner<S: StateStore>(store: &S, event_id: &EventId, caller: &Identity) -> bool {
    let owner = store.global_bytes(&event_key(event_id, EventField::Owner));
    owner.as_slice() == caller.as_bytes()
}

/// True when the event is active and not expired at `now`.
///
/// An expiry timestamp of 0 means no expiry; otherwise the event is active
/// strictly before the expiry instant.
#[must_use]
pub fn is_active<S: StateStore>(store: &S, event_id: &EventId, now: u64) -> bool {
    let active = store.global_uint(&event_key(event_id, EventField::Active)) == 1;
    let expiry = store.global_uint(&event_key(event_id, EventField::ExpiryTimestamp));
    active && (expiry == 0 || expiry > now)
}

/// True when the event has a free registration slot.
///
/// A maximum capacity of 0 means unlimited.
#[must_use]
pub fn has_capacity<S: StateStore>(store: &S, event_id: &EventId) -> bool {
    let max = store.global_uint(&event_key(event_id, EventField::MaxCapacity));
    let registered = store.global_uint(&event_key(event_id, EventField::RegisteredCount));
    max == 0 || registered < max
}

/// True when `identity` holds any registration for the event.
#[must_use]
pub fn is_registered<S: StateStore>(store: &S, event_id: &EventId, identity: &Identity) -> bool {
    store.local_uint(identity, &registration_key(event_id, RegistrationField::Status)) != 0
}

// =============================================================================
// TESTS
// =============================================================================
