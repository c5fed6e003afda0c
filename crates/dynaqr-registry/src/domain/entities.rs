//! # Domain Entities
//!
//! Typed projections of the persisted storage cells. The store itself only
//! holds scalar and byte-string cells; these structs are assembled by the
//! transition layer's view functions and are what read-side callers consume.

use crate::domain::value_objects::{Identity, RegistrationStatus};
use serde::{Deserialize, Serialize};

// =============================================================================
// GLOBAL AGGREGATES
// =============================================================================

/// Registry-wide aggregate counters. Single instance, global partition.
///
/// Created once at initialization, mutated by create/register/refund calls,
/// never destroyed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlobalAggregates {
    /// Number of events ever created.
    pub event_count: u64,
    /// Schema version string written at initialization.
    pub schema_version: String,
    /// Live registration count across all events.
    pub total_registrations: u64,
    /// Cumulative payment volume in microunits.
    pub total_revenue: u64,
}

// =============================================================================
// EVENT RECORD
// =============================================================================

/// One event's record, keyed by its caller-supplied id (global partition).
///
/// The owner is immutable once set. `registered_count <= max_capacity` holds
/// whenever `max_capacity > 0`. Records are never deleted; deactivation only
/// clears the active flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event name.
    pub name: Vec<u8>,
    /// Current redirect URL for scans.
    pub redirect_url: Vec<u8>,
    /// Access control type (public, nft-gated, time-based).
    pub access_type: Vec<u8>,
    /// Expiry timestamp; 0 means no expiry.
    pub expiry_timestamp: u64,
    /// Creation timestamp.
    pub created_at: u64,
    /// Creating identity; immutable once set.
    pub owner: Identity,
    /// Number of successful scans.
    pub scan_count: u64,
    /// Active flag; cleared by deactivation, never restored.
    pub active: bool,
    /// Ticket price in microunits.
    pub ticket_price: u64,
    /// Maximum capacity; 0 means unlimited.
    pub max_capacity: u64,
    /// Number of live registrations.
    pub registered_count: u64,
    /// Attendance NFT asset id; 0 means unassigned.
    pub nft_asset_id: u64,
}

// =============================================================================
// REGISTRATION RECORD
// =============================================================================

/// One identity's registration for one event (actor-local partition).
///
/// Owned exclusively by the registering identity: only that identity's own
/// calls may write it. A record with status `None` is indistinguishable from
/// an absent record, matching the store's zero-read semantics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistrationRecord {
    /// Registration status; only advances `Confirmed -> Attended`.
    pub status: RegistrationStatus,
    /// Timestamp the registration was recorded.
    pub registered_at: u64,
    /// Ticket tier selected at registration.
    pub ticket_tier: u64,
    /// Amount paid at registration, in microunits.
    pub payment_amount: u64,
    /// Attendance NFT flag; flips false -> true at most once.
    pub nft_minted: bool,
}

// =============================================================================
// TESTS
// =============================================================================
