//! # Lifecycle Scenarios
//!
//! End-to-end event and registration lifecycles driven through the public
//! port: creation uniqueness, capacity enforcement, attendance and NFT
//! progression, owner gating, and the refund counter semantics.

#[cfg(test)]
mod tests {
    use crate::integration::{
        create_event_args, identity, initialized_registry, register_args, simple_args,
    };
    use dynaqr_registry::prelude::*;

    const NOW: u64 = 1_700_000_000;

    fn owner() -> Identity {
        identity(0x01)
    }

    // =========================================================================
    // CREATION
    // =========================================================================

    #[test]
    fn test_create_succeeds_exactly_once_per_id() {
        let mut registry = initialized_registry(owner(), NOW);

        let args = create_event_args("ev1", "Conf", "https://x", "public", 0, 1_000_000, 2);
        registry
            .submit_call(CallInput::ordinary(owner(), NOW, args.clone()))
            .expect("first create succeeds");

        // A second create with the same id always fails, whoever calls it
        for caller in [owner(), identity(0x02)] {
            let err = registry
                .submit_call(CallInput::ordinary(caller, NOW + 1, args.clone()))
                .unwrap_err();
            assert!(
                matches!(err, CallError::State(StateError::EventAlreadyExists)),
                "duplicate create must fail with a state error, got {err}"
            );
        }

        assert_eq!(registry.aggregates().event_count, 1);
    }

    #[test]
    fn test_distinct_ids_create_independent_events() {
        let mut registry = initialized_registry(owner(), NOW);

        for (id, capacity) in [("ev1", 2u64), ("ev2", 0u64)] {
            let args = create_event_args(id, "Conf", "https://x", "public", 0, 5, capacity);
            registry
                .submit_call(CallInput::ordinary(owner(), NOW, args))
                .expect("create succeeds");
        }

        assert_eq!(registry.aggregates().event_count, 2);
        assert_eq!(registry.event(&EventId::from("ev1")).unwrap().max_capacity, 2);
        assert_eq!(registry.event(&EventId::from("ev2")).unwrap().max_capacity, 0);
    }

    // =========================================================================
    // CAPACITY
    // =========================================================================

    /// The canonical capacity walkthrough: cap 2, three registrants, one
    /// owner refund.
    #[test]
    fn test_capacity_scenario() {
        let mut registry = initialized_registry(owner(), NOW);
        let ev = EventId::from("ev1");
        let (a, b, c) = (identity(0x0A), identity(0x0B), identity(0x0C));

        // Setup: capacity 2, price 1_000_000 microunits
        registry
            .submit_call(CallInput::ordinary(
                owner(),
                NOW,
                create_event_args("ev1", "Conf", "https://x", "public", 0, 1_000_000, 2),
            ))
            .expect("create succeeds");
        assert_eq!(registry.event(&ev).unwrap().registered_count, 0);

        // A and B take the two slots
        registry
            .submit_call(CallInput::ordinary(a, NOW + 1, register_args("ev1", 0, 1_000_000)))
            .expect("A registers");
        assert_eq!(registry.event(&ev).unwrap().registered_count, 1);
        assert_eq!(registry.aggregates().total_revenue, 1_000_000);

        registry
            .submit_call(CallInput::ordinary(b, NOW + 2, register_args("ev1", 0, 1_000_000)))
            .expect("B registers");
        assert_eq!(registry.event(&ev).unwrap().registered_count, 2);

        // C bounces: 2 < 2 is false
        let err = registry
            .submit_call(CallInput::ordinary(c, NOW + 3, register_args("ev1", 0, 1_000_000)))
            .unwrap_err();
        assert!(
            matches!(
                err,
                CallError::State(StateError::AtCapacity { registered: 2, max: 2 })
            ),
            "full event must reject C, got {err}"
        );

        // Owner refund releases one slot globally...
        registry
            .submit_call(CallInput::ordinary(
                owner(),
                NOW + 4,
                simple_args("refund_registration", "ev1"),
            ))
            .expect("owner refunds");
        assert_eq!(registry.event(&ev).unwrap().registered_count, 1);
        assert_eq!(registry.aggregates().total_registrations, 1);

        // ...but B's record keeps its confirmed status and payment
        let reg = registry.registration(&b, &ev);
        assert_eq!(reg.status, RegistrationStatus::Confirmed);
        assert_eq!(reg.payment_amount, 1_000_000);

        // Revenue is cumulative: both payments stay counted
        assert_eq!(registry.aggregates().total_revenue, 2_000_000);

        // C can take the freed slot; B still cannot re-register
        registry
            .submit_call(CallInput::ordinary(c, NOW + 5, register_args("ev1", 0, 1_000_000)))
            .expect("C takes the freed slot");
        let err = registry
            .submit_call(CallInput::ordinary(b, NOW + 6, register_args("ev1", 0, 1_000_000)))
            .unwrap_err();
        assert!(matches!(
            err,
            CallError::State(StateError::AlreadyRegistered)
        ));
    }

    #[test]
    fn test_capacity_invariant_holds_throughout() {
        let mut registry = initialized_registry(owner(), NOW);
        let ev = EventId::from("ev1");
        registry
            .submit_call(CallInput::ordinary(
                owner(),
                NOW,
                create_event_args("ev1", "Conf", "https://x", "public", 0, 0, 3),
            ))
            .unwrap();

        for tag in 0x10..0x20u8 {
            let _ = registry.submit_call(CallInput::ordinary(
                identity(tag),
                NOW + u64::from(tag),
                register_args("ev1", 0, 0),
            ));
            let event = registry.event(&ev).unwrap();
            assert!(
                check_capacity_invariant(&event),
                "capacity invariant must hold after every call"
            );
        }

        assert_eq!(registry.event(&ev).unwrap().registered_count, 3);
    }

    // =========================================================================
    // ATTENDANCE AND NFT
    // =========================================================================

    #[test]
    fn test_attendance_requires_registration_and_counts_scans() {
        let mut registry = initialized_registry(owner(), NOW);
        let ev = EventId::from("ev1");
        let a = identity(0x0A);

        registry
            .submit_call(CallInput::ordinary(
                owner(),
                NOW,
                create_event_args("ev1", "Conf", "https://x", "public", 0, 0, 0),
            ))
            .unwrap();

        // Unregistered confirmation bounces
        let err = registry
            .submit_call(CallInput::ordinary(a, NOW, simple_args("confirm_attendance", "ev1")))
            .unwrap_err();
        assert!(matches!(err, CallError::State(StateError::NotRegistered)));

        registry
            .submit_call(CallInput::ordinary(a, NOW + 1, register_args("ev1", 0, 0)))
            .unwrap();
        registry
            .submit_call(CallInput::ordinary(a, NOW + 2, simple_args("confirm_attendance", "ev1")))
            .expect("registered caller confirms");

        assert_eq!(registry.registration(&a, &ev).status, RegistrationStatus::Attended);
        assert_eq!(registry.event(&ev).unwrap().scan_count, 1);

        // Anonymous scans also count, one per call
        for i in 0..3 {
            registry
                .submit_call(CallInput::ordinary(
                    identity(0x30),
                    NOW + 3 + i,
                    simple_args("increment_scan", "ev1"),
                ))
                .unwrap();
        }
        assert_eq!(registry.event(&ev).unwrap().scan_count, 4);
    }

    #[test]
    fn test_nft_mints_once_per_registration() {
        let mut registry = initialized_registry(owner(), NOW);
        let ev = EventId::from("ev1");
        let a = identity(0x0A);

        registry
            .submit_call(CallInput::ordinary(
                owner(),
                NOW,
                create_event_args("ev1", "Conf", "https://x", "nft-gated", 0, 0, 0),
            ))
            .unwrap();
        registry
            .submit_call(CallInput::ordinary(a, NOW + 1, register_args("ev1", 0, 0)))
            .unwrap();

        let mint = |asset: u64| {
            vec![
                b"mint_nft".to_vec(),
                b"ev1".to_vec(),
                encode_uint(asset),
            ]
        };

        // Before attendance the mint bounces
        let err = registry
            .submit_call(CallInput::ordinary(a, NOW + 2, mint(777)))
            .unwrap_err();
        assert!(matches!(err, CallError::State(StateError::NotAttended)));

        registry
            .submit_call(CallInput::ordinary(a, NOW + 3, simple_args("confirm_attendance", "ev1")))
            .unwrap();
        registry
            .submit_call(CallInput::ordinary(a, NOW + 4, mint(777)))
            .expect("attended caller mints");

        assert!(registry.registration(&a, &ev).nft_minted);
        assert_eq!(registry.event(&ev).unwrap().nft_asset_id, 777);

        // Second mint fails even though every other condition still holds
        let err = registry
            .submit_call(CallInput::ordinary(a, NOW + 5, mint(888)))
            .unwrap_err();
        assert!(matches!(err, CallError::State(StateError::NftAlreadyMinted)));
        assert_eq!(
            registry.event(&ev).unwrap().nft_asset_id,
            777,
            "failed mint must not move the asset id"
        );
    }

    // =========================================================================
    // OWNER GATING
    // =========================================================================

    #[test]
    fn test_owner_gated_operations_reject_non_owners() {
        let mut registry = initialized_registry(owner(), NOW);
        registry
            .submit_call(CallInput::ordinary(
                owner(),
                NOW,
                create_event_args("ev1", "Conf", "https://x", "public", 0, 0, 0),
            ))
            .unwrap();

        let stranger = identity(0x66);
        let gated: Vec<Vec<Vec<u8>>> = vec![
            vec![b"update_url".to_vec(), b"ev1".to_vec(), b"https://y".to_vec()],
            vec![
                b"update_ticket_price".to_vec(),
                b"ev1".to_vec(),
                encode_uint(9),
            ],
            simple_args("deactivate_event", "ev1"),
            simple_args("refund_registration", "ev1"),
        ];

        for args in gated {
            let selector = String::from_utf8_lossy(&args[0]).into_owned();
            let err = registry
                .submit_call(CallInput::ordinary(stranger, NOW + 1, args))
                .unwrap_err();
            assert!(
                matches!(err, CallError::Authorization(AuthorizationError::NotOwner)),
                "{selector} must reject non-owners, got {err}"
            );
        }

        // The record is untouched by the rejected calls
        let event = registry.event(&EventId::from("ev1")).unwrap();
        assert_eq!(event.redirect_url, b"https://x".to_vec());
        assert_eq!(event.ticket_price, 0);
        assert!(event.active);
    }

    #[test]
    fn test_owner_maintenance_operations() {
        let mut registry = initialized_registry(owner(), NOW);
        let ev = EventId::from("ev1");
        registry
            .submit_call(CallInput::ordinary(
                owner(),
                NOW,
                create_event_args("ev1", "Conf", "https://x", "public", 0, 1_000_000, 0),
            ))
            .unwrap();

        registry
            .submit_call(CallInput::ordinary(
                owner(),
                NOW + 1,
                vec![b"update_url".to_vec(), b"ev1".to_vec(), b"https://y".to_vec()],
            ))
            .expect("owner updates the URL");
        registry
            .submit_call(CallInput::ordinary(
                owner(),
                NOW + 2,
                vec![
                    b"update_ticket_price".to_vec(),
                    b"ev1".to_vec(),
                    encode_uint(2_000_000),
                ],
            ))
            .expect("owner updates the price");

        let event = registry.event(&ev).unwrap();
        assert_eq!(event.redirect_url, b"https://y".to_vec());
        assert_eq!(event.ticket_price, 2_000_000);
        assert_eq!(event.owner, owner(), "owner never changes");
    }

    // =========================================================================
    // DEACTIVATION AND EXPIRY
    // =========================================================================

    #[test]
    fn test_deactivation_gates_public_operations() {
        let mut registry = initialized_registry(owner(), NOW);
        registry
            .submit_call(CallInput::ordinary(
                owner(),
                NOW,
                create_event_args("ev1", "Conf", "https://x", "public", 0, 0, 0),
            ))
            .unwrap();
        registry
            .submit_call(CallInput::ordinary(owner(), NOW + 1, simple_args("deactivate_event", "ev1")))
            .unwrap();

        assert!(!registry.event(&EventId::from("ev1")).unwrap().active);

        let a = identity(0x0A);
        for args in [
            register_args("ev1", 0, 0),
            simple_args("increment_scan", "ev1"),
        ] {
            let err = registry
                .submit_call(CallInput::ordinary(a, NOW + 2, args))
                .unwrap_err();
            assert!(matches!(err, CallError::State(StateError::EventInactive)));
        }
    }

    #[test]
    fn test_expiry_boundary() {
        let mut registry = initialized_registry(owner(), NOW);
        registry
            .submit_call(CallInput::ordinary(
                owner(),
                NOW,
                create_event_args("ev1", "Conf", "https://x", "time-based", NOW + 100, 0, 0),
            ))
            .unwrap();

        let a = identity(0x0A);

        // Strictly before the expiry instant the event is live
        registry
            .submit_call(CallInput::ordinary(a, NOW + 99, simple_args("increment_scan", "ev1")))
            .expect("scan before expiry");

        // At the instant and after, it is not
        let err = registry
            .submit_call(CallInput::ordinary(a, NOW + 100, simple_args("increment_scan", "ev1")))
            .unwrap_err();
        assert!(matches!(err, CallError::State(StateError::EventInactive)));

        // Owner maintenance still works on an expired event
        registry
            .submit_call(CallInput::ordinary(
                owner(),
                NOW + 200,
                vec![b"update_url".to_vec(), b"ev1".to_vec(), b"https://z".to_vec()],
            ))
            .expect("owner updates expired event");
    }

    // =========================================================================
    // REFUND EDGES
    // =========================================================================

    #[test]
    fn test_refund_with_no_registrations_aborts() {
        let mut registry = initialized_registry(owner(), NOW);
        registry
            .submit_call(CallInput::ordinary(
                owner(),
                NOW,
                create_event_args("ev1", "Conf", "https://x", "public", 0, 0, 0),
            ))
            .unwrap();

        let err = registry
            .submit_call(CallInput::ordinary(
                owner(),
                NOW + 1,
                simple_args("refund_registration", "ev1"),
            ))
            .unwrap_err();
        assert!(matches!(err, CallError::State(StateError::CounterUnderflow)));

        // The failed refund left the aggregates alone
        assert_eq!(registry.aggregates().total_registrations, 0);
    }
}
