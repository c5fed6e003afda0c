//! # Typed Views
//!
//! Read-side assembly of domain entities from their storage cells. These are
//! the projections the inbound port serves; the transition logic itself
//! reads individual cells through the guards instead.

use crate::domain::entities::{EventRecord, GlobalAggregates, RegistrationRecord};
use crate::domain::keys::{
    aggregate_key, event_key, registration_key, AggregateField, EventField, RegistrationField,
};
use crate::domain::value_objects::{EventId, Identity, RegistrationStatus};
use crate::ports::outbound::StateStore;

/// True once the one-time initialization has written the aggregates.
#[must_use]
pub fn is_initialized<S: StateStore>(store: &S) -> bool {
    store
        .global_get(&aggregate_key(AggregateField::SchemaVersion))
        .is_some()
}

/// Loads the registry-wide aggregates. Zeroed before initialization.
#[must_use]
pub fn load_aggregates<S: StateStore>(store: &S) -> GlobalAggregates {
    GlobalAggregates {
        event_count: store.global_uint(&aggregate_key(AggregateField::EventCount)),
        schema_version: String::from_utf8_lossy(
            &store.global_bytes(&aggregate_key(AggregateField::SchemaVersion)),
        )
        .into_owned(),
        total_registrations: store.global_uint(&aggregate_key(AggregateField::TotalRegistrations)),
        total_revenue: store.global_uint(&aggregate_key(AggregateField::TotalRevenue)),
    }
}

/// Loads an event record, or `None` when no owner was ever recorded.
#[must_use]
pub fn load_event<S: StateStore>(store: &S, event_id: &EventId) -> Option<EventRecord> {
    let owner_cell = store.global_get(&event_key(event_id, EventField::Owner))?;
    let owner = owner_cell
        .as_bytes()
        .and_then(Identity::from_slice)
        .unwrap_or(Identity::ZERO);

    Some(EventRecord {
        name: store.global_bytes(&event_key(event_id, EventField::Name)),
        redirect_url: store.global_bytes(&event_key(event_id, EventField::RedirectUrl)),
        access_type: store.global_bytes(&event_key(event_id, EventField::AccessType)),
        expiry_timestamp: store.global_uint(&event_key(event_id, EventField::ExpiryTimestamp)),
        created_at: store.global_uint(&event_key(event_id, EventField::CreatedAt)),
        owner,
        scan_count: store.global_uint(&event_key(event_id, EventField::ScanCount)),
        active: store.global_uint(&event_key(event_id, EventField::Active)) == 1,
        ticket_price: store.global_uint(&event_key(event_id, EventField::TicketPrice)),
        max_capacity: store.global_uint(&event_key(event_id, EventField::MaxCapacity)),
        registered_count: store.global_uint(&event_key(event_id, EventField::RegisteredCount)),
        nft_asset_id: store.global_uint(&event_key(event_id, EventField::NftAssetId)),
    })
}

/// Loads one identity's registration for one event. Absent cells produce the
/// default record (status none), indistinguishable from never registering.
#[must_use]
pub fn load_registration<S: StateStore>(
    store: &S,
    identity: &Identity,
    event_id: &EventId,
) -> RegistrationRecord {
    RegistrationRecord {
        status: RegistrationStatus::from_uint(
            store.local_uint(identity, &registration_key(event_id, RegistrationField::Status)),
        ),
        registered_at: store.local_uint(
            identity,
            &registration_key(event_id, RegistrationField::RegisteredAt),
        ),
        ticket_tier: store.local_uint(
            identity,
            &registration_key(event_id, RegistrationField::TicketTier),
        ),
        payment_amount: store.local_uint(
            identity,
            &registration_key(event_id, RegistrationField::PaymentAmount),
        ),
        nft_minted: store.local_uint(
            identity,
            &registration_key(event_id, RegistrationField::NftMinted),
        ) == 1,
    }
}

// =============================================================================
// TESTS
// =============================================================================
