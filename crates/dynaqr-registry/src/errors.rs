//! # Error Types
//!
//! The abort taxonomy for registry calls. Externally every failure is the
//! same outcome - the call aborts and nothing is written; the taxonomy
//! exists for diagnostics and tests. No error is retried inside the core:
//! resubmission is the caller's responsibility.

use crate::domain::call::LifecycleStage;
use thiserror::Error;

// =============================================================================
// VALIDATION ERRORS
// =============================================================================

/// The call's argument list does not satisfy the operation's shape.
#[derive(Debug, Error, Clone)]
pub enum ValidationError {
    /// An ordinary call arrived with an empty argument list.
    #[error("missing operation selector")]
    MissingSelector,

    /// `args[0]` named no known operation.
    #[error("unknown operation selector: {0}")]
    UnknownSelector(String),

    /// Fewer arguments than the operation's minimum.
    #[error("not enough arguments for {operation}: {supplied} < {required}")]
    NotEnoughArguments {
        /// The selected operation.
        operation: &'static str,
        /// The operation's minimum argument count.
        required: usize,
        /// The count actually supplied.
        supplied: usize,
    },

    /// An argument index the operation reads is out of range.
    #[error("missing argument at index {index}")]
    MissingArgument {
        /// The out-of-range index.
        index: usize,
    },

    /// A scalar argument longer than 8 bytes.
    #[error("malformed uint argument at index {index}")]
    MalformedUint {
        /// The offending index.
        index: usize,
    },
}

// =============================================================================
// AUTHORIZATION ERRORS
// =============================================================================

/// The caller is not allowed to perform the mutation.
#[derive(Debug, Error, Clone)]
pub enum AuthorizationError {
    /// An owner-gated operation from a non-owner (or on an event that was
    /// never created - absent owner cells match no caller).
    #[error("caller is not the event owner")]
    NotOwner,

    /// A delta attempted to write another identity's local partition.
    #[error("write outside the caller's partition")]
    ForeignPartitionWrite,
}

// =============================================================================
// STATE ERRORS
// =============================================================================

/// The store's current state forbids the mutation.
#[derive(Debug, Error, Clone)]
pub enum StateError {
    /// A creation call against an already-initialized registry.
    #[error("registry already initialized")]
    AlreadyInitialized,

    /// An ordinary call before the one-time initialization.
    #[error("registry not initialized")]
    Uninitialized,

    /// `create_event` for an id whose owner cell is already set.
    #[error("event already exists: owner already recorded")]
    EventAlreadyExists,

    /// The event is deactivated or past its expiry timestamp.
    #[error("event is inactive or expired")]
    EventInactive,

    /// The event is at capacity.
    #[error("event at capacity: {registered}/{max}")]
    AtCapacity {
        /// Live registration count.
        registered: u64,
        /// Configured maximum.
        max: u64,
    },

    /// The caller already holds a registration for this event.
    #[error("caller already registered")]
    AlreadyRegistered,

    /// The caller holds no registration for this event.
    #[error("caller is not registered")]
    NotRegistered,

    /// The caller's registration has not advanced to attended.
    #[error("attendance not confirmed")]
    NotAttended,

    /// The caller's attendance NFT was already minted.
    #[error("attendance NFT already minted")]
    NftAlreadyMinted,

    /// An aggregate counter would exceed its range.
    #[error("aggregate counter overflow")]
    CounterOverflow,

    /// A refund against a zero registration counter.
    #[error("registration counter underflow")]
    CounterUnderflow,
}

// =============================================================================
// CALL ERROR
// =============================================================================

/// Top-level abort reason for one call.
#[derive(Debug, Error, Clone)]
pub enum CallError {
    /// Argument-shape failure.
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),

    /// Caller not authorized.
    #[error("authorization: {0}")]
    Authorization(#[from] AuthorizationError),

    /// State forbids the mutation.
    #[error("state: {0}")]
    State(#[from] StateError),

    /// Program upgrade/deletion; permanently disabled to freeze the
    /// deployed logic.
    #[error("program is immutable: {stage} calls are permanently rejected")]
    ImmutableProgram {
        /// The rejected lifecycle stage.
        stage: LifecycleStage,
    },
}

impl CallError {
    /// Coarse category label, used as a structured logging field.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Authorization(_) => "authorization",
            Self::State(_) => "state",
            Self::ImmutableProgram { .. } => "immutable",
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
