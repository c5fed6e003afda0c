//! # Call Envelope
//!
//! The external contract of the core: one atomic, serialized invocation.
//! A call carries the sender identity (the sole source of identity - payload
//! arguments never duplicate it), the declared lifecycle stage, the
//! environment timestamp, and an ordered byte-string argument list where
//! `args[0]` is the operation selector and `args[1]` the event id.

use crate::domain::value_objects::{EventId, Identity};
use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// LIFECYCLE STAGE
// =============================================================================

/// Call classification, resolved before operation dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleStage {
    /// The first-ever invocation against a fresh registry instance.
    Creation,
    /// Account opt-in; accepted as a no-op.
    OptIn,
    /// Account close-out; accepted as a no-op.
    CloseOut,
    /// Account clear-state; accepted, drops the caller's local partition.
    ClearState,
    /// Program upgrade attempt; permanently rejected.
    UpdateProgram,
    /// Program deletion attempt; permanently rejected.
    DeleteProgram,
    /// An ordinary operation call, dispatched by selector.
    Ordinary,
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Creation => "creation",
            Self::OptIn => "opt-in",
            Self::CloseOut => "close-out",
            Self::ClearState => "clear-state",
            Self::UpdateProgram => "update-program",
            Self::DeleteProgram => "delete-program",
            Self::Ordinary => "ordinary",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// OPERATION SELECTORS
// =============================================================================

/// The nine state-mutating operations an ordinary call may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    /// Create an event record; the caller becomes the immutable owner.
    CreateEvent,
    /// Register the caller for an event.
    RegisterEvent,
    /// Advance the caller's registration to attended.
    ConfirmAttendance,
    /// Mint the caller's attendance NFT.
    MintNft,
    /// Replace the event's redirect URL (owner only).
    UpdateUrl,
    /// Replace the event's ticket price (owner only).
    UpdateTicketPrice,
    /// Clear the event's active flag (owner only).
    DeactivateEvent,
    /// Count one scan against an active event.
    IncrementScan,
    /// Release one registration slot (owner only).
    RefundRegistration,
}

impl OpKind {
    /// Every operation, in dispatch-table order.
    pub const ALL: [Self; 9] = [
        Self::CreateEvent,
        Self::RegisterEvent,
        Self::ConfirmAttendance,
        Self::MintNft,
        Self::UpdateUrl,
        Self::UpdateTicketPrice,
        Self::DeactivateEvent,
        Self::IncrementScan,
        Self::RefundRegistration,
    ];

    /// Returns the wire selector for this operation (`args[0]`).
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::CreateEvent => "create_event",
            Self::RegisterEvent => "register_event",
            Self::ConfirmAttendance => "confirm_attendance",
            Self::MintNft => "mint_nft",
            Self::UpdateUrl => "update_url",
            Self::UpdateTicketPrice => "update_ticket_price",
            Self::DeactivateEvent => "deactivate_event",
            Self::IncrementScan => "increment_scan",
            Self::RefundRegistration => "refund_registration",
        }
    }

    /// Minimum argument count, selector and event id included. Calls with
    /// fewer arguments abort before the operation runs.
    #[must_use]
    pub const fn min_args(self) -> usize {
        match self {
            Self::CreateEvent => 8,
            Self::RegisterEvent => 4,
            Self::MintNft | Self::UpdateUrl | Self::UpdateTicketPrice => 3,
            Self::ConfirmAttendance
            | Self::DeactivateEvent
            | Self::IncrementScan
            | Self::RefundRegistration => 2,
        }
    }

    /// Resolves a wire selector to an operation.
    #[must_use]
    pub fn from_selector(selector: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.selector().as_bytes() == selector)
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector())
    }
}

// =============================================================================
// CALL INPUT
// =============================================================================

/// One atomic invocation of the transition logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallInput {
    /// The calling identity. Sole source of identity for the call.
    pub sender: Identity,
    /// Declared lifecycle stage.
    pub stage: LifecycleStage,
    /// Environment timestamp at call time.
    pub now: u64,
    /// Ordered byte-string arguments; empty for non-ordinary stages.
    pub args: Vec<Vec<u8>>,
}

impl CallInput {
    /// Builds the one-time creation call.
    #[must_use]
    pub fn creation(sender: Identity, now: u64) -> Self {
        Self::staged(sender, LifecycleStage::Creation, now)
    }

    /// Builds an ordinary operation call from its argument list.
    #[must_use]
    pub fn ordinary(sender: Identity, now: u64, args: Vec<Vec<u8>>) -> Self {
        Self {
            sender,
            stage: LifecycleStage::Ordinary,
            now,
            args,
        }
    }

    /// Builds a no-argument call for the given stage.
    #[must_use]
    pub fn staged(sender: Identity, stage: LifecycleStage, now: u64) -> Self {
        Self {
            sender,
            stage,
            now,
            args: Vec::new(),
        }
    }

    /// Returns the operation selector (`args[0]`), if present.
    #[must_use]
    pub fn selector(&self) -> Option<&[u8]> {
        self.args.first().map(Vec::as_slice)
    }

    /// Returns the event id argument (`args[1]`), if present.
    #[must_use]
    pub fn event_id(&self) -> Option<EventId> {
        self.args.get(1).map(|bytes| EventId::from(bytes.as_slice()))
    }

    /// Returns the raw byte-string argument at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingArgument`] when the index is out of
    /// range.
    pub fn bytes_arg(&self, index: usize) -> Result<&[u8], ValidationError> {
        self.args
            .get(index)
            .map(Vec::as_slice)
            .ok_or(ValidationError::MissingArgument { index })
    }

    /// Decodes the argument at `index` as a big-endian scalar.
    ///
    /// Arguments of up to 8 bytes decode; shorter arguments are zero-extended.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingArgument`] when the index is out of
    /// range, or [`ValidationError::MalformedUint`] when the argument is
    /// longer than 8 bytes.
    pub fn uint_arg(&self, index: usize) -> Result<u64, ValidationError> {
        let bytes = self.bytes_arg(index)?;
        if bytes.len() > 8 {
            return Err(ValidationError::MalformedUint { index });
        }
        let mut buf = [0u8; 8];
        buf[8 - bytes.len()..].copy_from_slice(bytes);
        Ok(u64::from_be_bytes(buf))
    }
}

/// Encodes a scalar argument big-endian, the inverse of the call's scalar
/// decode. Submission clients use this layout on the wire.
#[must_use]
pub fn encode_uint(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

// =============================================================================
// CALL OUTCOME
// =============================================================================

/// The successful result of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// The registry was initialized; aggregates now exist.
    Initialized,
    /// Opt-in accepted; no state was written.
    OptInAccepted,
    /// Close-out accepted; no state was written.
    CloseOutAccepted,
    /// Clear-state accepted; the caller's local partition was dropped.
    ClearStateAccepted,
    /// The selected operation ran and its writes were committed.
    Applied(OpKind),
}

impl fmt::Display for CallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialized => write!(f, "initialized"),
            Self::OptInAccepted => write!(f, "opt-in accepted"),
            Self::CloseOutAccepted => write!(f, "close-out accepted"),
            Self::ClearStateAccepted => write!(f, "clear-state accepted"),
            Self::Applied(op) => write!(f, "applied {op}"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
