//! # Registry Service
//!
//! The inbound-port implementation: classifies each call, validates the
//! partition boundary, commits the delta all-or-nothing, and keeps stats.
//!
//! Serialization is type-level: `submit_call` takes `&mut self`, so exactly
//! one call mutates the store at a time - the in-process rendering of the
//! environment's external total order. A call either commits every write in
//! its delta or, on any failed guard, commits nothing.

use crate::config::RegistryConfig;
use crate::domain::call::{CallInput, CallOutcome, LifecycleStage};
use crate::domain::entities::{EventRecord, GlobalAggregates, RegistrationRecord};
use crate::domain::invariants;
use crate::domain::value_objects::{EventId, Identity};
use crate::errors::CallError;
use crate::ports::inbound::RegistryApi;
use crate::ports::outbound::StateStore;
use crate::transition::{self, view};
use tracing::{debug, error, info, warn};

// =============================================================================
// STATS
// =============================================================================

/// Counters for the service's lifetime.
#[derive(Debug, Default, Clone)]
pub struct ServiceStats {
    /// Calls whose delta was committed.
    pub calls_applied: u64,
    /// Calls aborted by a failed guard.
    pub calls_rejected: u64,
    /// Individual writes committed across all applied calls.
    pub writes_committed: u64,
}

// =============================================================================
// SERVICE
// =============================================================================

/// The registry core wired to a store adapter.
pub struct RegistryService<S: StateStore> {
    config: RegistryConfig,
    store: S,
    stats: ServiceStats,
}

impl<S: StateStore> RegistryService<S> {
    /// Creates a service with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, RegistryConfig::default())
    }

    /// Creates a service with an explicit configuration.
    pub fn with_config(store: S, config: RegistryConfig) -> Self {
        Self {
            config,
            store,
            stats: ServiceStats::default(),
        }
    }

    /// Current lifetime counters.
    #[must_use]
    pub fn stats(&self) -> ServiceStats {
        self.stats.clone()
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Post-apply invariant audit; violations are logged, never retroactively
    /// aborted - the delta validated before commit, so a violation here means
    /// a defect in the transition logic itself.
    fn audit(
        &self,
        call: &CallInput,
        event_id: &EventId,
        pre_event: Option<&EventRecord>,
        pre_registration: &RegistrationRecord,
    ) {
        if let Some(next_event) = view::load_event(&self.store, event_id) {
            let result = invariants::check_event_invariants(pre_event, &next_event);
            for violation in result.violations() {
                error!(event_id = %event_id, %violation, "event invariant violated");
            }
        }

        let next_registration = view::load_registration(&self.store, &call.sender, event_id);
        let result =
            invariants::check_registration_invariants(pre_registration, &next_registration);
        for violation in result.violations() {
            error!(event_id = %event_id, sender = %call.sender, %violation, "registration invariant violated");
        }
    }
}

impl<S: StateStore> RegistryApi for RegistryService<S> {
    fn submit_call(&mut self, call: CallInput) -> Result<CallOutcome, CallError> {
        debug!(
            sender = %call.sender,
            stage = %call.stage,
            args = call.args.len(),
            "call received"
        );

        let audited_event_id = if self.config.strict_invariant_audit
            && call.stage == LifecycleStage::Ordinary
        {
            call.event_id()
        } else {
            None
        };
        let pre_event = audited_event_id
            .as_ref()
            .and_then(|id| view::load_event(&self.store, id));
        let pre_registration = audited_event_id
            .as_ref()
            .map(|id| view::load_registration(&self.store, &call.sender, id));

        let validated = transition::dispatch(&self.store, &call, &self.config.schema_version)
            .and_then(|(outcome, delta)| {
                delta.check_partition(&call.sender)?;
                Ok((outcome, delta))
            });

        match validated {
            Ok((outcome, delta)) => {
                transition::apply_delta(&mut self.store, &delta);
                self.stats.calls_applied += 1;
                self.stats.writes_committed += delta.len() as u64;
                info!(sender = %call.sender, %outcome, writes = delta.len(), "call applied");

                if let (Some(event_id), Some(pre_registration)) =
                    (audited_event_id, pre_registration.as_ref())
                {
                    self.audit(&call, &event_id, pre_event.as_ref(), pre_registration);
                }
                Ok(outcome)
            }
            Err(abort) => {
                self.stats.calls_rejected += 1;
                warn!(
                    sender = %call.sender,
                    stage = %call.stage,
                    category = abort.category(),
                    %abort,
                    "call rejected"
                );
                Err(abort)
            }
        }
    }

    fn event(&self, event_id: &EventId) -> Option<EventRecord> {
        view::load_event(&self.store, event_id)
    }

    fn registration(&self, identity: &Identity, event_id: &EventId) -> RegistrationRecord {
        view::load_registration(&self.store, identity, event_id)
    }

    fn aggregates(&self) -> GlobalAggregates {
        view::load_aggregates(&self.store)
    }
}

/// A service over a fresh in-memory store, for tests and examples.
#[must_use]
pub fn create_test_service() -> RegistryService<crate::adapters::InMemoryStore> {
    RegistryService::new(crate::adapters::InMemoryStore::new())
}

// =============================================================================
// TESTS
// =============================================================================
