//! # Entity Lifecycle Operations
//!
//! The nine state-mutating operations plus the one-time initialization, each
//! a pure function `(store, call) -> Result<StoreDelta, CallError>`. Every
//! guard an operation needs runs before its first write is queued; the
//! returned delta is committed by the dispatcher only on success.
//!
//! Counter arithmetic is checked: an overflowing or underflowing aggregate
//! aborts the call instead of wrapping.

use crate::domain::call::{CallInput, OpKind};
use crate::domain::delta::StoreDelta;
use crate::domain::keys::{
    aggregate_key, event_key, registration_key, AggregateField, EventField, RegistrationField,
};
use crate::domain::value_objects::{EventId, RegistrationStatus, StoreValue};
use crate::errors::{AuthorizationError, CallError, StateError, ValidationError};
use crate::ports::outbound::StateStore;
use crate::transition::guards;

/// Argument index of the event id for every ordinary operation.
const ARG_EVENT_ID: usize = 1;

fn event_id_arg(call: &CallInput) -> Result<EventId, CallError> {
    call.event_id()
        .ok_or_else(|| ValidationError::MissingArgument { index: ARG_EVENT_ID }.into())
}

fn checked_add(counter: u64, delta: u64) -> Result<u64, CallError> {
    counter
        .checked_add(delta)
        .ok_or_else(|| StateError::CounterOverflow.into())
}

fn checked_sub(counter: u64, delta: u64) -> Result<u64, CallError> {
    counter
        .checked_sub(delta)
        .ok_or_else(|| StateError::CounterUnderflow.into())
}

// =============================================================================
// DISPATCH TABLE
// =============================================================================

/// Runs the selected operation against the current store state.
///
/// # Errors
///
/// Propagates the operation's first failed guard; see the individual
/// operations for their abort conditions.
pub fn apply<S: StateStore>(
    op: OpKind,
    store: &S,
    call: &CallInput,
) -> Result<StoreDelta, CallError> {
    match op {
        OpKind::CreateEvent => create_event(store, call),
        OpKind::RegisterEvent => register_event(store, call),
        OpKind::ConfirmAttendance => confirm_attendance(store, call),
        OpKind::MintNft => mint_nft(store, call),
        OpKind::UpdateUrl => update_url(store, call),
        OpKind::UpdateTicketPrice => update_ticket_price(store, call),
        OpKind::DeactivateEvent => deactivate_event(store, call),
        OpKind::IncrementScan => increment_scan(store, call),
        OpKind::RefundRegistration => refund_registration(store, call),
    }
}

// =============================================================================
// INITIALIZATION
// =============================================================================

/// One-time initialization: zeroes the aggregates and records the schema
/// version. Runs on the first-ever invocation; never again.
#[must_use]
pub fn init(schema_version: &str) -> StoreDelta {
    let mut delta = StoreDelta::new();
    delta.put_global(aggregate_key(AggregateField::EventCount), 0u64);
    delta.put_global(
        aggregate_key(AggregateField::SchemaVersion),
        StoreValue::bytes(schema_version.as_bytes().to_vec()),
    );
    delta.put_global(aggregate_key(AggregateField::TotalRegistrations), 0u64);
    delta.put_global(aggregate_key(AggregateField::TotalRevenue), 0u64);
    delta
}

// =============================================================================
// CREATE
// =============================================================================

/// Creates an event record with the caller as its immutable owner.
///
/// Arguments: `[selector, event_id, name, url, access_type, expiry, price,
/// capacity]`. Aborts with [`StateError::EventAlreadyExists`] when an owner
/// is already recorded for the id.
pub fn create_event<S: StateStore>(store: &S, call: &CallInput) -> Result<StoreDelta, CallError> {
    let event_id = event_id_arg(call)?;

    if store
        .global_get(&event_key(&event_id, EventField::Owner))
        .is_some()
    {
        return Err(StateError::EventAlreadyExists.into());
    }

    let name = call.bytes_arg(2)?.to_vec();
    let url = call.bytes_arg(3)?.to_vec();
    let access_type = call.bytes_arg(4)?.to_vec();
    let expiry = call.uint_arg(5)?;
    let price = call.uint_arg(6)?;
    let capacity = call.uint_arg(7)?;

    let event_count = store.global_uint(&aggregate_key(AggregateField::EventCount));

    let mut delta = StoreDelta::new();
    delta.put_global(event_key(&event_id, EventField::Name), StoreValue::Bytes(name));
    delta.put_global(
        event_key(&event_id, EventField::RedirectUrl),
        StoreValue::Bytes(url),
    );
    delta.put_global(
        event_key(&event_id, EventField::AccessType),
        StoreValue::Bytes(access_type),
    );
    delta.put_global(event_key(&event_id, EventField::ExpiryTimestamp), expiry);
    delta.put_global(event_key(&event_id, EventField::TicketPrice), price);
    delta.put_global(event_key(&event_id, EventField::MaxCapacity), capacity);
    delta.put_global(event_key(&event_id, EventField::CreatedAt), call.now);
    delta.put_global(
        event_key(&event_id, EventField::Owner),
        StoreValue::bytes(call.sender.as_bytes().to_vec()),
    );
    delta.put_global(event_key(&event_id, EventField::ScanCount), 0u64);
    delta.put_global(event_key(&event_id, EventField::Active), true);
    delta.put_global(event_key(&event_id, EventField::RegisteredCount), 0u64);
    delta.put_global(event_key(&event_id, EventField::NftAssetId), 0u64);
    delta.put_global(
        aggregate_key(AggregateField::EventCount),
        checked_add(event_count, 1)?,
    );
    Ok(delta)
}

// =============================================================================
// REGISTRATION
// =============================================================================

/// Registers the caller for an event and records the payment.
///
/// Arguments: `[selector, event_id, tier, amount]`. Guards, in order:
/// active, free capacity, not already registered.
pub fn register_event<S: StateStore>(store: &S, call: &CallInput) -> Result<StoreDelta, CallError> {
    let event_id = event_id_arg(call)?;

    if !guards::is_active(store, &event_id, call.now) {
        return Err(StateError::EventInactive.into());
    }

    let max = store.global_uint(&event_key(&event_id, EventField::MaxCapacity));
    let registered = store.global_uint(&event_key(&event_id, EventField::RegisteredCount));
    if !guards::has_capacity(store, &event_id) {
        return Err(StateError::AtCapacity { registered, max }.into());
    }

    if guards::is_registered(store, &event_id, &call.sender) {
        return Err(StateError::AlreadyRegistered.into());
    }

    let tier = call.uint_arg(2)?;
    let amount = call.uint_arg(3)?;

    let total_registrations = store.global_uint(&aggregate_key(AggregateField::TotalRegistrations));
    let total_revenue = store.global_uint(&aggregate_key(AggregateField::TotalRevenue));

    let mut delta = StoreDelta::new();
    delta.put_local(
        call.sender,
        registration_key(&event_id, RegistrationField::Status),
        RegistrationStatus::Confirmed.as_uint(),
    );
    delta.put_local(
        call.sender,
        registration_key(&event_id, RegistrationField::RegisteredAt),
        call.now,
    );
    delta.put_local(
        call.sender,
        registration_key(&event_id, RegistrationField::TicketTier),
        tier,
    );
    delta.put_local(
        call.sender,
        registration_key(&event_id, RegistrationField::PaymentAmount),
        amount,
    );
    delta.put_local(
        call.sender,
        registration_key(&event_id, RegistrationField::NftMinted),
        0u64,
    );
    delta.put_global(
        event_key(&event_id, EventField::RegisteredCount),
        checked_add(registered, 1)?,
    );
    delta.put_global(
        aggregate_key(AggregateField::TotalRegistrations),
        checked_add(total_registrations, 1)?,
    );
    delta.put_global(
        aggregate_key(AggregateField::TotalRevenue),
        checked_add(total_revenue, amount)?,
    );
    Ok(delta)
}

/// Advances the caller's registration to attended and counts the scan.
///
/// Re-confirming an already-attended registration is permitted: the status
/// stays attended and the scan still counts.
pub fn confirm_attendance<S: StateStore>(
    store: &S,
    call: &CallInput,
) -> Result<StoreDelta, CallError> {
    let event_id = event_id_arg(call)?;

    if !guards::is_registered(store, &event_id, &call.sender) {
        return Err(StateError::NotRegistered.into());
    }

    let scan_count = store.global_uint(&event_key(&event_id, EventField::ScanCount));

    let mut delta = StoreDelta::new();
    delta.put_local(
        call.sender,
        registration_key(&event_id, RegistrationField::Status),
        RegistrationStatus::Attended.as_uint(),
    );
    delta.put_global(
        event_key(&event_id, EventField::ScanCount),
        checked_add(scan_count, 1)?,
    );
    Ok(delta)
}

/// Mints the caller's attendance NFT, at most once, and records the supplied
/// asset id on the event.
///
/// Arguments: `[selector, event_id, asset_id]`. Requires attended status and
/// an unminted flag.
pub fn mint_nft<S: StateStore>(store: &S, call: &CallInput) -> Result<StoreDelta, CallError> {
    let event_id = event_id_arg(call)?;

    let status = RegistrationStatus::from_uint(store.local_uint(
        &call.sender,
        &registration_key(&event_id, RegistrationField::Status),
    ));
    if !status.is_registered() {
        return Err(StateError::NotRegistered.into());
    }
    if status != RegistrationStatus::Attended {
        return Err(StateError::NotAttended.into());
    }

    let minted = store.local_uint(
        &call.sender,
        &registration_key(&event_id, RegistrationField::NftMinted),
    ) == 1;
    if minted {
        return Err(StateError::NftAlreadyMinted.into());
    }

    let asset_id = call.uint_arg(2)?;

    let mut delta = StoreDelta::new();
    delta.put_local(
        call.sender,
        registration_key(&event_id, RegistrationField::NftMinted),
        1u64,
    );
    delta.put_global(event_key(&event_id, EventField::NftAssetId), asset_id);
    Ok(delta)
}

// =============================================================================
// OWNER-GATED MUTATIONS
// =============================================================================

fn require_owner<S: StateStore>(
    store: &S,
    event_id: &EventId,
    call: &CallInput,
) -> Result<(), CallError> {
    if guards::is_owner(store, event_id, &call.sender) {
        Ok(())
    } else {
        Err(AuthorizationError::NotOwner.into())
    }
}

/// Replaces the event's redirect URL. Owner only.
pub fn update_url<S: StateStore>(store: &S, call: &CallInput) -> Result<StoreDelta, CallError> {
    let event_id = event_id_arg(call)?;
    require_owner(store, &event_id, call)?;

    let url = call.bytes_arg(2)?.to_vec();

    let mut delta = StoreDelta::new();
    delta.put_global(
        event_key(&event_id, EventField::RedirectUrl),
        StoreValue::Bytes(url),
    );
    Ok(delta)
}

/// Replaces the event's ticket price. Owner only; already-recorded payments
/// are untouched.
pub fn update_ticket_price<S: StateStore>(
    store: &S,
    call: &CallInput,
) -> Result<StoreDelta, CallError> {
    let event_id = event_id_arg(call)?;
    require_owner(store, &event_id, call)?;

    let price = call.uint_arg(2)?;

    let mut delta = StoreDelta::new();
    delta.put_global(event_key(&event_id, EventField::TicketPrice), price);
    Ok(delta)
}

/// Clears the event's active flag. Owner only. The record itself is never
/// deleted.
pub fn deactivate_event<S: StateStore>(
    store: &S,
    call: &CallInput,
) -> Result<StoreDelta, CallError> {
    let event_id = event_id_arg(call)?;
    require_owner(store, &event_id, call)?;

    let mut delta = StoreDelta::new();
    delta.put_global(event_key(&event_id, EventField::Active), false);
    Ok(delta)
}

/// Releases one registration slot. Owner only.
///
/// Only the counters move: the refunded account's registration record keeps
/// its status and payment amount, so that account cannot register again.
pub fn refund_registration<S: StateStore>(
    store: &S,
    call: &CallInput,
) -> Result<StoreDelta, CallError> {
    let event_id = event_id_arg(call)?;
    require_owner(store, &event_id, call)?;

    let registered = store.global_uint(&event_key(&event_id, EventField::RegisteredCount));
    let total_registrations = store.global_uint(&aggregate_key(AggregateField::TotalRegistrations));

    let mut delta = StoreDelta::new();
    delta.put_global(
        event_key(&event_id, EventField::RegisteredCount),
        checked_sub(registered, 1)?,
    );
    delta.put_global(
        aggregate_key(AggregateField::TotalRegistrations),
        checked_sub(total_registrations, 1)?,
    );
    Ok(delta)
}

// =============================================================================
// PUBLIC COUNTERS
// =============================================================================

/// Counts one scan against an active event.
pub fn increment_scan<S: StateStore>(store: &S, call: &CallInput) -> Result<StoreDelta, CallError> {
    let event_id = event_id_arg(call)?;

    if !guards::is_active(store, &event_id, call.now) {
        return Err(StateError::EventInactive.into());
    }

    let scan_count = store.global_uint(&event_key(&event_id, EventField::ScanCount));

    let mut delta = StoreDelta::new();
    delta.put_global(
        event_key(&event_id, EventField::ScanCount),
        checked_add(scan_count, 1)?,
    );
    Ok(delta)
}

// =============================================================================
// TESTS
// =============================================================================
