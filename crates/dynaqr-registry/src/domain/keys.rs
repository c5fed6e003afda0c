//! # Key Codec
//!
//! Deterministic derivation of storage keys from an entity identifier and a
//! field tag. The identifier is length-prefixed before the tag is appended,
//! so no two distinct `(entity_id, field_tag)` pairs can ever produce the
//! same key - not even when an identifier embeds the bytes of a tag or of
//! another identifier plus tag.
//!
//! Aggregate keys carry no identifier and are the bare fixed tags.

use crate::domain::value_objects::EventId;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// STORAGE KEY
// =============================================================================

/// An opaque storage key produced by the codec.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StorageKey(Vec<u8>);

impl StorageKey {
    /// Returns the raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StorageKey(0x{})", hex::encode(&self.0))
    }
}

// =============================================================================
// FIELD TAGS
// =============================================================================

/// Fields of an event record, one storage cell each (global partition).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    /// Event name.
    Name,
    /// Current redirect URL.
    RedirectUrl,
    /// Access control type (public, nft-gated, time-based).
    AccessType,
    /// Expiry timestamp; 0 means no expiry.
    ExpiryTimestamp,
    /// Creation timestamp.
    CreatedAt,
    /// Owner identity; immutable once set.
    Owner,
    /// Number of successful scans.
    ScanCount,
    /// Active flag (1 active, 0 deactivated).
    Active,
    /// Ticket price in microunits.
    TicketPrice,
    /// Maximum capacity; 0 means unlimited.
    MaxCapacity,
    /// Number of live registrations.
    RegisteredCount,
    /// Attendance NFT asset id; 0 means unassigned.
    NftAssetId,
}

impl EventField {
    /// Every event field, in storage layout order.
    pub const ALL: [Self; 12] = [
        Self::Name,
        Self::RedirectUrl,
        Self::AccessType,
        Self::ExpiryTimestamp,
        Self::CreatedAt,
        Self::Owner,
        Self::ScanCount,
        Self::Active,
        Self::TicketPrice,
        Self::MaxCapacity,
        Self::RegisteredCount,
        Self::NftAssetId,
    ];

    /// Returns the field's tag bytes as persisted in storage keys.
    #[must_use]
    pub const fn tag(self) -> &'static [u8] {
        match self {
            Self::Name => b"event_name",
            Self::RedirectUrl => b"current_url",
            Self::AccessType => b"access_type",
            Self::ExpiryTimestamp => b"expiry_date",
            Self::CreatedAt => b"created_at",
            Self::Owner => b"owner",
            Self::ScanCount => b"scan_count",
            Self::Active => b"active",
            Self::TicketPrice => b"ticket_price",
            Self::MaxCapacity => b"max_capacity",
            Self::RegisteredCount => b"registered_count",
            Self::NftAssetId => b"nft_asset_id",
        }
    }
}

/// Fields of one identity's registration record (actor-local partition).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationField {
    /// Registration status scalar (0 none, 1 confirmed, 2 attended).
    Status,
    /// Timestamp the registration was recorded.
    RegisteredAt,
    /// Ticket tier selected at registration.
    TicketTier,
    /// Amount paid at registration, in microunits.
    PaymentAmount,
    /// Attendance NFT minted flag.
    NftMinted,
}

impl RegistrationField {
    /// Every registration field, in storage layout order.
    pub const ALL: [Self; 5] = [
        Self::Status,
        Self::RegisteredAt,
        Self::TicketTier,
        Self::PaymentAmount,
        Self::NftMinted,
    ];

    /// Returns the field's tag bytes as persisted in storage keys.
    #[must_use]
    pub const fn tag(self) -> &'static [u8] {
        match self {
            Self::Status => b"registration_status",
            Self::RegisteredAt => b"registration_date",
            Self::TicketTier => b"ticket_tier",
            Self::PaymentAmount => b"payment_amount",
            Self::NftMinted => b"nft_minted",
        }
    }
}

/// Registry-wide aggregate cells (global partition, no entity identifier).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateField {
    /// Number of events ever created.
    EventCount,
    /// Schema version string, written once at initialization.
    SchemaVersion,
    /// Live registration count across all events.
    TotalRegistrations,
    /// Cumulative payment volume in microunits.
    TotalRevenue,
}

impl AggregateField {
    /// Every aggregate field.
    pub const ALL: [Self; 4] = [
        Self::EventCount,
        Self::SchemaVersion,
        Self::TotalRegistrations,
        Self::TotalRevenue,
    ];

    /// Returns the field's tag bytes as persisted in storage keys.
    #[must_use]
    pub const fn tag(self) -> &'static [u8] {
        match self {
            Self::EventCount => b"event_count",
            Self::SchemaVersion => b"contract_version",
            Self::TotalRegistrations => b"total_registrations",
            Self::TotalRevenue => b"total_revenue",
        }
    }
}

// =============================================================================
// KEY DERIVATION
// =============================================================================

/// Composes `be32(len(id)) || id || tag`.
///
/// The length prefix makes the encoding injective: the identifier's byte
/// boundary is recoverable, so an id that happens to end with a tag's bytes
/// cannot alias another `(id, tag)` pair.
fn length_prefixed(id: &EventId, tag: &[u8]) -> StorageKey {
    let id_bytes = id.as_bytes();
    let mut key = Vec::with_capacity(4 + id_bytes.len() + tag.len());
    key.extend_from_slice(&u32::try_from(id_bytes.len()).unwrap_or(u32::MAX).to_be_bytes());
    key.extend_from_slice(id_bytes);
    key.extend_from_slice(tag);
    StorageKey(key)
}

/// Derives the global-partition key for one field of one event.
#[must_use]
pub fn event_key(event_id: &EventId, field: EventField) -> StorageKey {
    length_prefixed(event_id, field.tag())
}

/// Derives the actor-local key for one field of one registration.
///
/// The registering identity is not part of the key; it selects the local
/// sub-partition the key lives in.
#[must_use]
pub fn registration_key(event_id: &EventId, field: RegistrationField) -> StorageKey {
    length_prefixed(event_id, field.tag())
}

/// Derives the global-partition key for one registry-wide aggregate.
#[must_use]
pub fn aggregate_key(field: AggregateField) -> StorageKey {
    StorageKey(field.tag().to_vec())
}

// =============================================================================
// TESTS
// =============================================================================
