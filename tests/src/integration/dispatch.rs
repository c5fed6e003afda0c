//! # Dispatch Boundaries
//!
//! Lifecycle-stage classification, the one-time initialization, the frozen
//! program surface, clear-state, and argument-shape validation - everything
//! the dispatcher decides before an operation runs.

#[cfg(test)]
mod tests {
    use crate::integration::{
        create_event_args, identity, init_test_logging, initialized_registry, register_args,
        simple_args,
    };
    use dynaqr_registry::prelude::*;

    const NOW: u64 = 1_700_000_000;

    fn owner() -> Identity {
        identity(0x01)
    }

    // =========================================================================
    // INITIALIZATION BOUNDARY
    // =========================================================================

    #[test]
    fn test_first_call_initializes_with_defaults() {
        init_test_logging();
        let registry = initialized_registry(owner(), NOW);

        let aggregates = registry.aggregates();
        assert_eq!(aggregates.schema_version, "2.0.0");
        assert_eq!(aggregates.event_count, 0);
        assert_eq!(aggregates.total_registrations, 0);
        assert_eq!(aggregates.total_revenue, 0);
    }

    #[test]
    fn test_second_creation_call_is_rejected() {
        let mut registry = initialized_registry(owner(), NOW);
        let err = registry
            .submit_call(CallInput::creation(identity(0x02), NOW + 1))
            .unwrap_err();
        assert!(matches!(
            err,
            CallError::State(StateError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_ordinary_call_before_initialization_is_rejected() {
        let mut registry = create_test_service();
        let err = registry
            .submit_call(CallInput::ordinary(
                owner(),
                NOW,
                simple_args("increment_scan", "ev1"),
            ))
            .unwrap_err();
        assert!(matches!(err, CallError::State(StateError::Uninitialized)));
    }

    #[test]
    fn test_configured_schema_version_is_persisted() {
        let config = RegistryConfig::from_json(r#"{"schema_version": "2.1.0"}"#).unwrap();
        let mut registry = RegistryService::with_config(InMemoryStore::new(), config);
        registry
            .submit_call(CallInput::creation(owner(), NOW))
            .unwrap();
        assert_eq!(registry.aggregates().schema_version, "2.1.0");
    }

    // =========================================================================
    // NO-OP STAGES AND THE FROZEN PROGRAM
    // =========================================================================

    #[test]
    fn test_opt_in_and_close_out_accept_without_writes() {
        let mut registry = initialized_registry(owner(), NOW);
        let writes_before = registry.stats().writes_committed;

        let outcome = registry
            .submit_call(CallInput::staged(identity(0x05), LifecycleStage::OptIn, NOW))
            .unwrap();
        assert_eq!(outcome, CallOutcome::OptInAccepted);

        let outcome = registry
            .submit_call(CallInput::staged(identity(0x05), LifecycleStage::CloseOut, NOW))
            .unwrap();
        assert_eq!(outcome, CallOutcome::CloseOutAccepted);

        assert_eq!(
            registry.stats().writes_committed,
            writes_before,
            "no-op stages must not write"
        );
    }

    #[test]
    fn test_update_and_delete_program_always_rejected() {
        init_test_logging();
        let mut registry = initialized_registry(owner(), NOW);

        for stage in [LifecycleStage::UpdateProgram, LifecycleStage::DeleteProgram] {
            let err = registry
                .submit_call(CallInput::staged(owner(), stage, NOW))
                .unwrap_err();
            assert!(
                matches!(err, CallError::ImmutableProgram { .. }),
                "{stage} must stay disabled, got {err}"
            );
        }
    }

    // =========================================================================
    // CLEAR-STATE
    // =========================================================================

    #[test]
    fn test_clear_state_drops_only_the_callers_partition() {
        let mut registry = initialized_registry(owner(), NOW);
        let ev = EventId::from("ev1");
        let (a, b) = (identity(0x0A), identity(0x0B));

        registry
            .submit_call(CallInput::ordinary(
                owner(),
                NOW,
                create_event_args("ev1", "Conf", "https://x", "public", 0, 0, 0),
            ))
            .unwrap();
        for (who, when) in [(a, NOW + 1), (b, NOW + 2)] {
            registry
                .submit_call(CallInput::ordinary(who, when, register_args("ev1", 0, 50)))
                .unwrap();
        }

        let outcome = registry
            .submit_call(CallInput::staged(a, LifecycleStage::ClearState, NOW + 3))
            .unwrap();
        assert_eq!(outcome, CallOutcome::ClearStateAccepted);

        // A's registration reads as absent; B's is untouched
        assert_eq!(registry.registration(&a, &ev), RegistrationRecord::default());
        assert_eq!(
            registry.registration(&b, &ev).status,
            RegistrationStatus::Confirmed
        );

        // Global counters deliberately keep their values
        assert_eq!(registry.event(&ev).unwrap().registered_count, 2);
        assert_eq!(registry.aggregates().total_registrations, 2);

        // Having cleared, A may register again
        registry
            .submit_call(CallInput::ordinary(a, NOW + 4, register_args("ev1", 0, 50)))
            .expect("cleared account registers afresh");
        assert_eq!(registry.event(&ev).unwrap().registered_count, 3);
    }

    // =========================================================================
    // ARGUMENT VALIDATION
    // =========================================================================

    #[test]
    fn test_selector_and_argument_shape_validation() {
        let mut registry = initialized_registry(owner(), NOW);

        // Empty argument list
        let err = registry
            .submit_call(CallInput::ordinary(owner(), NOW, vec![]))
            .unwrap_err();
        assert!(matches!(
            err,
            CallError::Validation(ValidationError::MissingSelector)
        ));

        // Selector no operation answers to (the superseded read-only one)
        let err = registry
            .submit_call(CallInput::ordinary(owner(), NOW, simple_args("get_event", "ev1")))
            .unwrap_err();
        assert!(matches!(
            err,
            CallError::Validation(ValidationError::UnknownSelector(_))
        ));

        // Every operation rejects argument lists below its minimum
        let short_calls: Vec<Vec<Vec<u8>>> = vec![
            create_event_args("ev1", "Conf", "https://x", "public", 0, 0, 0)[..7].to_vec(),
            register_args("ev1", 0, 0)[..3].to_vec(),
            vec![b"mint_nft".to_vec(), b"ev1".to_vec()],
            vec![b"update_url".to_vec(), b"ev1".to_vec()],
            vec![b"update_ticket_price".to_vec(), b"ev1".to_vec()],
            vec![b"deactivate_event".to_vec()],
            vec![b"increment_scan".to_vec()],
            vec![b"refund_registration".to_vec()],
            vec![b"confirm_attendance".to_vec()],
        ];
        for args in short_calls {
            let selector = String::from_utf8_lossy(&args[0]).into_owned();
            let err = registry
                .submit_call(CallInput::ordinary(owner(), NOW, args))
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    CallError::Validation(ValidationError::NotEnoughArguments { .. })
                ),
                "{selector} must reject short argument lists, got {err}"
            );
        }
    }

    #[test]
    fn test_oversized_uint_argument_aborts() {
        let mut registry = initialized_registry(owner(), NOW);

        let mut args = create_event_args("ev1", "Conf", "https://x", "public", 0, 0, 0);
        args[5] = vec![0u8; 9]; // expiry wider than 8 bytes

        let err = registry
            .submit_call(CallInput::ordinary(owner(), NOW, args))
            .unwrap_err();
        assert!(matches!(
            err,
            CallError::Validation(ValidationError::MalformedUint { index: 5 })
        ));

        // The aborted create left nothing behind
        assert!(registry.event(&EventId::from("ev1")).is_none());
        assert_eq!(registry.aggregates().event_count, 0);
    }

    // =========================================================================
    // DETERMINISM
    // =========================================================================

    #[test]
    fn test_identical_call_sequences_produce_identical_state() {
        let run = || {
            let mut registry = initialized_registry(owner(), NOW);
            registry
                .submit_call(CallInput::ordinary(
                    owner(),
                    NOW,
                    create_event_args("ev1", "Conf", "https://x", "public", 0, 7, 5),
                ))
                .unwrap();
            for tag in [0x0A, 0x0B, 0x0C] {
                registry
                    .submit_call(CallInput::ordinary(
                        identity(tag),
                        NOW + u64::from(tag),
                        register_args("ev1", 1, 7),
                    ))
                    .unwrap();
            }
            let _ = registry.submit_call(CallInput::ordinary(
                identity(0x0A),
                NOW + 50,
                simple_args("confirm_attendance", "ev1"),
            ));
            (
                registry.event(&EventId::from("ev1")).unwrap(),
                registry.aggregates(),
            )
        };

        assert_eq!(run(), run(), "replaying a call sequence must be bit-stable");
    }
}
