//! # DynaQR Registry - Event State-Transition Core
//!
//! Deterministic transition logic for an event/ticketing registry that lives
//! inside a metered execution environment: one shared key-value store,
//! mutated only through atomic, all-or-nothing calls, each call fully
//! serialized by an external total order the core does not implement.
//!
//! ## Call Model
//!
//! Every call is classified by lifecycle stage before any operation runs:
//! the first-ever call initializes the aggregates; opt-in and close-out are
//! accepted as no-ops; clear-state drops the caller's local partition;
//! update-program and delete-program are permanently rejected; ordinary
//! calls dispatch on the selector in `args[0]`. A failed guard aborts the
//! whole call with zero committed writes.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Owner immutable once set | `transition/operations.rs` - `create_event` rejects existing ids |
//! | `registered_count <= max_capacity` when capped | `transition/guards.rs` - `has_capacity` before every registration |
//! | Status only advances, never regresses | `transition/operations.rs` - `confirm_attendance` |
//! | NFT mints at most once, after attendance | `transition/operations.rs` - `mint_nft` |
//! | Abort implies no writes | `service.rs` - delta committed only after full validation |
//! | Local writes stay in the caller's partition | `domain/delta.rs` - `StoreDelta::check_partition` |
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Key Codec | `domain/keys.rs` | Injective storage-key derivation |
//! | Store Accessor | `ports/outbound.rs` | Typed get/put over two partitions |
//! | Guard Predicates | `transition/guards.rs` | Pure read-only authorization/state checks |
//! | Lifecycle Operations | `transition/operations.rs` | The nine mutations plus init |
//! | Dispatcher | `transition/dispatch.rs` | Stage then selector dispatch |
//! | Service | `service.rs` | Atomic commit, stats, invariant audit |
//!
//! ## Usage Example
//!
//! ```
//! use dynaqr_registry::prelude::*;
//!
//! let mut registry = create_test_service();
//! let owner = Identity::new([1u8; 32]);
//!
//! // First-ever call initializes the aggregates
//! registry.submit_call(CallInput::creation(owner, 1_700_000_000)).unwrap();
//!
//! // Ordinary calls dispatch on args[0]
//! let outcome = registry
//!     .submit_call(CallInput::ordinary(
//!         owner,
//!         1_700_000_000,
//!         vec![
//!             b"create_event".to_vec(),
//!             b"ev1".to_vec(),
//!             b"Conf".to_vec(),
//!             b"https://x".to_vec(),
//!             b"public".to_vec(),
//!             encode_uint(0),
//!             encode_uint(1_000_000),
//!             encode_uint(2),
//!         ],
//!     ))
//!     .unwrap();
//! assert_eq!(outcome, CallOutcome::Applied(OpKind::CreateEvent));
//! assert_eq!(registry.aggregates().event_count, 1);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;
pub mod transition;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Value objects
    pub use crate::domain::value_objects::{EventId, Identity, RegistrationStatus, StoreValue};

    // Call envelope
    pub use crate::domain::call::{
        encode_uint, CallInput, CallOutcome, LifecycleStage, OpKind,
    };

    // Entities
    pub use crate::domain::entities::{EventRecord, GlobalAggregates, RegistrationRecord};

    // Key codec
    pub use crate::domain::keys::{
        aggregate_key, event_key, registration_key, AggregateField, EventField,
        RegistrationField, StorageKey,
    };

    // Write sets
    pub use crate::domain::delta::{StoreDelta, WriteOp};

    // Invariants
    pub use crate::domain::invariants::{
        check_capacity_invariant, check_event_invariants, check_registration_invariants,
        InvariantCheckResult, InvariantViolation,
    };

    // Errors
    pub use crate::errors::{AuthorizationError, CallError, StateError, ValidationError};

    // Ports
    pub use crate::ports::inbound::RegistryApi;
    pub use crate::ports::outbound::StateStore;

    // Transition engine
    pub use crate::transition::{apply_delta, dispatch, guards, view};

    // Adapters
    pub use crate::adapters::InMemoryStore;

    // Service
    pub use crate::service::{create_test_service, RegistryService, ServiceStats};

    // Config
    pub use crate::config::RegistryConfig;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Schema version written into the aggregates at initialization.
pub const SCHEMA_VERSION: &str = "2.0.0";

// =============================================================================
// TESTS
// =============================================================================
