//! # Domain Invariants
//!
//! Critical invariants that must hold across every committed call. The
//! operations enforce them by construction; these checks exist as a runtime
//! audit the service can run after applying a delta, so a regression in the
//! transition logic surfaces immediately instead of corrupting the registry
//! silently.

use crate::domain::entities::{EventRecord, RegistrationRecord};
use crate::domain::value_objects::RegistrationStatus;
use thiserror::Error;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Capacity bound: `registered_count <= max_capacity` whenever a maximum is
/// configured (0 means unlimited).
#[must_use]
pub fn check_capacity_invariant(event: &EventRecord) -> bool {
    event.max_capacity == 0 || event.registered_count <= event.max_capacity
}

/// Owner immutability: no committed call changes a recorded owner.
#[must_use]
pub fn check_owner_immutable(prev: &EventRecord, next: &EventRecord) -> bool {
    prev.owner == next.owner
}

/// Status monotonicity: a registration only advances, never regresses, and
/// the minted flag never clears.
#[must_use]
pub fn check_registration_monotonic(
    prev: &RegistrationRecord,
    next: &RegistrationRecord,
) -> bool {
    next.status.as_uint() >= prev.status.as_uint() && (!prev.nft_minted || next.nft_minted)
}

/// A minted attendance NFT implies attended status.
#[must_use]
pub fn check_nft_requires_attendance(registration: &RegistrationRecord) -> bool {
    !registration.nft_minted || registration.status == RegistrationStatus::Attended
}

// =============================================================================
// VIOLATION REPORT
// =============================================================================

/// One detected invariant violation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Registration count exceeded the configured maximum.
    #[error("capacity exceeded: {registered} > {max}")]
    CapacityExceeded {
        /// Live registration count.
        registered: u64,
        /// Configured maximum.
        max: u64,
    },

    /// A committed call rewrote the owner cell.
    #[error("owner mutated after creation")]
    OwnerMutated,

    /// A registration status moved backwards.
    #[error("registration status regressed: {from} -> {to}")]
    StatusRegressed {
        /// Status scalar before the call.
        from: u64,
        /// Status scalar after the call.
        to: u64,
    },

    /// A minted flag was cleared.
    #[error("minted flag cleared")]
    NftFlagCleared,

    /// A minted flag without attended status.
    #[error("NFT minted without attendance")]
    NftWithoutAttendance,
}

/// Outcome of an invariant audit.
#[derive(Debug, Clone, Default)]
pub struct InvariantCheckResult {
    violations: Vec<InvariantViolation>,
}

impl InvariantCheckResult {
    /// True when no violation was detected.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// The detected violations, in check order.
    #[must_use]
    pub fn violations(&self) -> &[InvariantViolation] {
        &self.violations
    }
}

/// Audits one event record, against its pre-call state when available.
#[must_use]
pub fn check_event_invariants(
    prev: Option<&EventRecord>,
    next: &EventRecord,
) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_capacity_invariant(next) {
        violations.push(InvariantViolation::CapacityExceeded {
            registered: next.registered_count,
            max: next.max_capacity,
        });
    }

    if let Some(prev) = prev {
        if !check_owner_immutable(prev, next) {
            violations.push(InvariantViolation::OwnerMutated);
        }
    }

    InvariantCheckResult { violations }
}

/// Audits one registration record transition.
#[must_use]
pub fn check_registration_invariants(
    prev: &RegistrationRecord,
    next: &RegistrationRecord,
) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if next.status.as_uint() < prev.status.as_uint() {
        violations.push(InvariantViolation::StatusRegressed {
            from: prev.status.as_uint(),
            to: next.status.as_uint(),
        });
    }

    if prev.nft_minted && !next.nft_minted {
        violations.push(InvariantViolation::NftFlagCleared);
    }

    if !check_nft_requires_attendance(next) {
        violations.push(InvariantViolation::NftWithoutAttendance);
    }

    InvariantCheckResult { violations }
}

// =============================================================================
// TESTS
// =============================================================================
