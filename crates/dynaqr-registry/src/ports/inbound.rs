//! # Driving Ports (Inbound)
//!
//! The interface the registry core offers to its callers: submit one atomic
//! call, and read typed projections of the persisted state. The port is
//! synchronous - every call is a finite sequence of guarded reads and
//! writes, serialized by the caller holding `&mut self`.

use crate::domain::call::{CallInput, CallOutcome};
use crate::domain::entities::{EventRecord, GlobalAggregates, RegistrationRecord};
use crate::domain::value_objects::{EventId, Identity};
use crate::errors::CallError;

/// The registry's call-processing and read surface.
pub trait RegistryApi {
    /// Applies one call atomically.
    ///
    /// On success all of the call's writes are committed; on any failure
    /// nothing is written and the abort reason is returned.
    ///
    /// # Errors
    ///
    /// Returns a [`CallError`] naming the first failed guard. The store is
    /// untouched in every error case.
    fn submit_call(&mut self, call: CallInput) -> Result<CallOutcome, CallError>;

    /// Reads an event record, or `None` when no owner was ever recorded for
    /// the id.
    fn event(&self, event_id: &EventId) -> Option<EventRecord>;

    /// Reads one identity's registration for one event. An absent
    /// registration reads as the default record (status none).
    fn registration(&self, identity: &Identity, event_id: &EventId) -> RegistrationRecord;

    /// Reads the registry-wide aggregates. Zeroed before initialization.
    fn aggregates(&self) -> GlobalAggregates;
}
