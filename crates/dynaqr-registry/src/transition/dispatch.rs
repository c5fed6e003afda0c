//! # Dispatcher
//!
//! Two-level dispatch for every incoming call: lifecycle stage first, then
//! the operation selector. The dispatcher itself never writes; it returns
//! the outcome plus the delta the service commits.
//!
//! Stage table: first-ever call initializes; opt-in and close-out are
//! accepted as no-ops; clear-state is accepted and drops the caller's local
//! partition; update-program and delete-program are permanently rejected to
//! freeze the deployed logic; everything else is an ordinary operation call.

use crate::domain::call::{CallInput, CallOutcome, LifecycleStage, OpKind};
use crate::domain::delta::StoreDelta;
use crate::errors::{CallError, StateError, ValidationError};
use crate::ports::outbound::StateStore;
use crate::transition::{operations, view};

/// Classifies and runs one call against the current store state.
///
/// # Errors
///
/// Returns the first failed guard of the stage or operation; the store is
/// never touched here.
pub fn dispatch<S: StateStore>(
    store: &S,
    call: &CallInput,
    schema_version: &str,
) -> Result<(CallOutcome, StoreDelta), CallError> {
    match call.stage {
        LifecycleStage::Creation => {
            if view::is_initialized(store) {
                return Err(StateError::AlreadyInitialized.into());
            }
            Ok((CallOutcome::Initialized, operations::init(schema_version)))
        }
        LifecycleStage::OptIn => Ok((CallOutcome::OptInAccepted, StoreDelta::new())),
        LifecycleStage::CloseOut => Ok((CallOutcome::CloseOutAccepted, StoreDelta::new())),
        LifecycleStage::ClearState => {
            let mut delta = StoreDelta::new();
            delta.clear_local(call.sender);
            Ok((CallOutcome::ClearStateAccepted, delta))
        }
        LifecycleStage::UpdateProgram | LifecycleStage::DeleteProgram => {
            Err(CallError::ImmutableProgram { stage: call.stage })
        }
        LifecycleStage::Ordinary => {
            if !view::is_initialized(store) {
                return Err(StateError::Uninitialized.into());
            }
            let op = resolve_operation(call)?;
            let delta = operations::apply(op, store, call)?;
            Ok((CallOutcome::Applied(op), delta))
        }
    }
}

/// Resolves `args[0]` to an operation and enforces its minimum argument
/// count.
fn resolve_operation(call: &CallInput) -> Result<OpKind, ValidationError> {
    let selector = call.selector().ok_or(ValidationError::MissingSelector)?;
    let op = OpKind::from_selector(selector).ok_or_else(|| {
        ValidationError::UnknownSelector(String::from_utf8_lossy(selector).into_owned())
    })?;
    if call.args.len() < op.min_args() {
        return Err(ValidationError::NotEnoughArguments {
            operation: op.selector(),
            required: op.min_args(),
            supplied: call.args.len(),
        });
    }
    Ok(op)
}

// =============================================================================
// TESTS
// =============================================================================
