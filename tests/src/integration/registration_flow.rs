//! # Registration Flow
//!
//! Coordinator (wx-04) driving the issuer (wx-01) and ledger (wx-02)
//! doubles through the runtime bridges, then handing off to the
//! dashboard (wx-03).

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shared_types::{Address, FailureKind, RealIdentity, Severity};
    use wx_01_stealth_issuer::MockStealthIssuer;
    use wx_02_ledger_client::{BlogEntry, LedgerClient, LedgerError, MockLedger, MockWallet};
    use wx_03_dashboard::{DashboardApi, DashboardConfig, DashboardService};
    use wx_04_registration::{MockIssuance, RegistrationApi, RegistrationCoordinator, RegistrationState};
    use writex_runtime::adapters::{
        HandoffSlot, IssuerBridge, LedgerRecordSource, LedgerRegistry, WalletIdentity,
    };
    use writex_runtime::{WritexConfig, WritexRuntime};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const ACCOUNT: Address = Address([0xa1; 20]);

    struct Harness {
        coordinator: RegistrationCoordinator,
        ledger: Arc<MockLedger>,
        handoff: Arc<HandoffSlot>,
    }

    fn harness(issuer: Arc<dyn wx_04_registration::StealthIssuance>, ledger: Arc<MockLedger>) -> Harness {
        let handoff = Arc::new(HandoffSlot::new());
        let coordinator = RegistrationCoordinator::new(
            Arc::new(WalletIdentity::new(Arc::new(MockWallet::new(ACCOUNT)))),
            issuer,
            Arc::new(LedgerRegistry::new(ledger.clone())),
            handoff.clone(),
        );
        Harness {
            coordinator,
            ledger,
            handoff,
        }
    }

    fn runtime(ledger: Arc<MockLedger>) -> WritexRuntime {
        WritexRuntime::with_components(
            WritexConfig::for_testing(),
            Arc::new(MockWallet::new(ACCOUNT)),
            Arc::new(MockStealthIssuer::new()),
            ledger,
        )
    }

    // =============================================================================
    // REGISTRATION → DASHBOARD
    // =============================================================================

    #[tokio::test]
    async fn test_handoff_opens_dashboard_with_ledger_records() {
        let issuer = MockStealthIssuer::new();
        let real = RealIdentity::new(ACCOUNT.to_string()).unwrap();
        let alias = issuer.derive(&real).unwrap();
        let ledger = Arc::new(MockLedger::new(ACCOUNT).with_entries(vec![BlogEntry {
            title: "Genesis".into(),
            content_pointer: "QmGenesis".into(),
            proof: "p".into(),
            key: "0xother".into(),
        }]));
        let h = harness(Arc::new(IssuerBridge::new(Arc::new(issuer))), ledger.clone());

        let state = h.coordinator.begin().await;
        assert!(matches!(state, RegistrationState::Registered { .. }));

        let handoff = h.handoff.get().unwrap();
        assert_eq!(handoff.stealth_address, alias);
        assert_eq!(ledger.writer_address(alias.as_str()).await.unwrap(), ACCOUNT);

        let dashboard = DashboardService::new(
            DashboardConfig::for_testing(),
            LedgerRecordSource::new(ledger),
        );
        let view = dashboard.load(&handoff).await.unwrap();
        assert_eq!(view.stealth_address, alias);
        assert_eq!(view.records.len(), 1);
        assert_eq!(view.records[0].content_pointer, "QmGenesis");
        assert_eq!(view.status.text, "Loaded 1 blog.");
    }

    #[tokio::test]
    async fn test_concurrent_triggers_write_once() {
        let ledger = Arc::new(MockLedger::new(ACCOUNT));
        let rt = runtime(ledger.clone());

        let (a, b) = tokio::join!(rt.register(), rt.register());
        let completed = [&a, &b].iter().filter(|s| s.is_complete()).count();
        assert!(completed >= 1, "{a} / {b}");
        assert_eq!(ledger.register_call_count(), 1);

        let again = rt.register().await;
        assert_eq!(ledger.register_call_count(), 1);
        assert!(again.is_complete());
    }

    #[tokio::test]
    async fn test_issuer_outage_then_retry() {
        let issuance = Arc::new(MockIssuance::new());
        issuance.fail_with(FailureKind::BackendUnreachable);
        let h = harness(issuance.clone(), Arc::new(MockLedger::new(ACCOUNT)));

        let state = h.coordinator.begin().await;
        assert_eq!(state.failure(), Some(FailureKind::BackendUnreachable));
        assert_eq!(h.ledger.register_call_count(), 0);
        assert!(h.handoff.get().is_none());

        issuance.clear_failure();
        let state = h.coordinator.begin().await;
        assert!(matches!(state, RegistrationState::Registered { .. }));
        assert_eq!(h.ledger.register_call_count(), 1);
        assert!(h.handoff.get().is_some());
    }

    #[tokio::test]
    async fn test_signer_rejection_maps_through_bridge() {
        let ledger = Arc::new(MockLedger::new(ACCOUNT));
        ledger.fail_with(LedgerError::UserRejected("denied".into()));
        let rt = runtime(ledger);

        let state = rt.register().await;
        assert_eq!(state.failure(), Some(FailureKind::TransactionRejected));
        assert!(state.can_retry());
        assert!(rt.handoff().is_none());
    }

    #[tokio::test]
    async fn test_status_observer_sees_outcome() {
        let rt = runtime(Arc::new(MockLedger::new(ACCOUNT)));
        let mut status = rt.subscribe();

        rt.register().await;
        assert!(status.has_changed().unwrap());
        let last = status.borrow_and_update().clone();
        assert_eq!(last.severity, Severity::Success);
        assert_eq!(last, rt.status());
    }
}
