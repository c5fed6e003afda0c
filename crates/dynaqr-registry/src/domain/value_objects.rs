//! # Value Objects
//!
//! Immutable domain primitives for the registry state-transition core.
//! These types represent concepts defined by their value, not identity.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// IDENTITY (32 bytes)
// =============================================================================

/// A 32-byte caller identity.
///
/// The identity of a call is taken solely from the call envelope; payload
/// arguments never carry identity fields.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Identity(pub [u8; 32]);

impl Identity {
    /// The zero identity.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an identity from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates an identity from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 32 {
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns true if this is the zero identity.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{}...{}",
            hex::encode(&self.0[..4]),
            hex::encode(&self.0[28..])
        )
    }
}

impl From<[u8; 32]> for Identity {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Identity> for [u8; 32] {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

// =============================================================================
// EVENT ID (caller-supplied byte string)
// =============================================================================

/// A caller-supplied byte string naming an event record.
///
/// Uniqueness is enforced at creation time (an owner cell may be written only
/// once per id), not by the store itself.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct EventId(Vec<u8>);

impl EventId {
    /// Creates an event id from raw bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the identifier in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<&[u8]> for EventId {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Vec<u8>> for EventId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// STORE VALUE (scalar storage cell)
// =============================================================================

/// A single storage cell: either an unsigned scalar or a byte string.
///
/// The store has no native records. Every entity field occupies one cell, and
/// an absent cell reads as the zero value of its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreValue {
    /// A 64-bit unsigned scalar cell.
    Uint(u64),
    /// A byte-string cell.
    Bytes(Vec<u8>),
}

impl StoreValue {
    /// Creates a byte-string cell.
    #[must_use]
    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(value.into())
    }

    /// Returns the scalar value, or None for a byte-string cell.
    #[must_use]
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::Uint(value) => Some(*value),
            Self::Bytes(_) => None,
        }
    }

    /// Returns the byte-string value, or None for a scalar cell.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Uint(_) => None,
            Self::Bytes(value) => Some(value),
        }
    }
}

impl From<u64> for StoreValue {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<bool> for StoreValue {
    fn from(value: bool) -> Self {
        Self::Uint(u64::from(value))
    }
}

// =============================================================================
// REGISTRATION STATUS
// =============================================================================

/// Status of one identity's registration for one event.
///
/// The status only advances `Confirmed -> Attended`; it never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RegistrationStatus {
    /// No registration recorded.
    #[default]
    None,
    /// Registration recorded, attendance not yet confirmed.
    Confirmed,
    /// Attendance confirmed at the venue.
    Attended,
}

impl RegistrationStatus {
    /// Decodes a status from its stored scalar. Unknown scalars read as None.
    #[must_use]
    pub fn from_uint(value: u64) -> Self {
        match value {
            1 => Self::Confirmed,
            2 => Self::Attended,
            _ => Self::None,
        }
    }

    /// Returns the scalar stored for this status.
    #[must_use]
    pub const fn as_uint(self) -> u64 {
        match self {
            Self::None => 0,
            Self::Confirmed => 1,
            Self::Attended => 2,
        }
    }

    /// Returns true if any registration is recorded.
    #[must_use]
    pub fn is_registered(self) -> bool {
        !matches!(self, Self::None)
    }
}

// =============================================================================
// TESTS
// =============================================================================
