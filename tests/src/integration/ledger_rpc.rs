//! # Ledger JSON-RPC Flow
//!
//! `JsonRpcWallet` + `JsonRpcLedgerClient` against the stub node, and the
//! full runtime wired to both stub services.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use shared_types::{Address, FailureKind, StealthAddress, StealthIdentity};
    use wx_02_ledger_client::{
        BlogEntry, JsonRpcClient, JsonRpcLedgerClient, JsonRpcWallet, LedgerClient, LedgerConfig,
        LedgerError, WalletError, WalletProvider,
    };
    use wx_04_registration::{RegistrationState, Stage};
    use writex_runtime::{WritexConfig, WritexRuntime};

    use crate::support::node::DUPLICATE_WRITER;
    use crate::support::{IssuerBehavior, StubIssuer, StubNode};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const ACCOUNT: Address = Address([0xa1; 20]);
    const CONTRACT: Address = Address([0x42; 20]);

    type Client = JsonRpcLedgerClient<Arc<JsonRpcWallet>>;

    fn ledger(node: &StubNode) -> Client {
        let config = LedgerConfig::for_testing().with_rpc_url(node.url());
        let rpc = Arc::new(JsonRpcClient::new(config.rpc_url.clone(), config.request_timeout()).unwrap());
        let wallet = Arc::new(JsonRpcWallet::new(rpc.clone()));
        JsonRpcLedgerClient::new(rpc, wallet, CONTRACT, &config)
    }

    fn stealth(addr: &str) -> StealthIdentity {
        StealthIdentity::fresh(StealthAddress::new(addr).unwrap())
    }

    fn entry(title: &str, pointer: &str) -> BlogEntry {
        BlogEntry {
            title: title.into(),
            content_pointer: pointer.into(),
            proof: "sig".into(),
            key: "0xstealth".into(),
        }
    }

    // =============================================================================
    // WALLET
    // =============================================================================

    #[tokio::test]
    async fn test_wallet_account_is_requested_once() {
        let node = StubNode::start(ACCOUNT).await;
        let client = ledger(&node);

        assert_eq!(client.wallet().current_address().await.unwrap(), ACCOUNT);
        assert_eq!(client.wallet().current_address().await.unwrap(), ACCOUNT);
        assert_eq!(node.count("eth_requestAccounts"), 1);
    }

    #[tokio::test]
    async fn test_wallet_falls_back_to_eth_accounts() {
        let node = StubNode::start(ACCOUNT).await;
        node.legacy_accounts();
        let client = ledger(&node);

        assert_eq!(client.wallet().current_address().await.unwrap(), ACCOUNT);
        assert_eq!(node.methods(), ["eth_requestAccounts", "eth_accounts"]);
    }

    #[tokio::test]
    async fn test_wallet_without_accounts_is_unavailable() {
        let node = StubNode::start(ACCOUNT).await;
        node.clear_accounts();
        let err = ledger(&node).register(&stealth("0xstealth")).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::WalletUnavailable);
        assert_eq!(node.count("eth_sendTransaction"), 0);
    }

    #[tokio::test]
    async fn test_wallet_refusal_is_failed() {
        let node = StubNode::start(ACCOUNT).await;
        node.lock_accounts();
        let client = ledger(&node);

        let err = client.wallet().current_address().await.unwrap_err();
        assert!(matches!(&err, WalletError::Failed(msg) if msg.contains("wallet is locked")), "{err}");
        assert_eq!(node.methods(), ["eth_requestAccounts"]);
    }

    // =============================================================================
    // WRITES
    // =============================================================================

    #[tokio::test]
    async fn test_register_binds_key_to_account() {
        let node = StubNode::start(ACCOUNT).await;
        node.pending_polls(2);
        let client = ledger(&node);

        let receipt = client.register(&stealth("0xstealth")).await.unwrap();
        assert_eq!(receipt.gas_used, Some(21_000));
        assert_eq!(node.writer("0xstealth"), Some(ACCOUNT));
        assert_eq!(node.count("eth_getTransactionReceipt"), 3);
        assert_eq!(client.writer_address("0xstealth").await.unwrap(), ACCOUNT);
    }

    #[tokio::test]
    async fn test_duplicate_register_reverts_before_signing() {
        let node = StubNode::start(ACCOUNT).await;
        node.seed_writer("0xstealth", Address([0x99; 20]));

        let err = ledger(&node).register(&stealth("0xstealth")).await.unwrap_err();
        assert_eq!(err, LedgerError::reverted(DUPLICATE_WRITER));
        assert_eq!(node.count("eth_sendTransaction"), 0);
        assert_eq!(node.writer("0xstealth"), Some(Address([0x99; 20])));
    }

    #[tokio::test]
    async fn test_signer_rejection() {
        let node = StubNode::start(ACCOUNT).await;
        node.reject_signing();

        let err = ledger(&node).register(&stealth("0xstealth")).await.unwrap_err();
        assert!(matches!(err, LedgerError::UserRejected(_)));
        assert_eq!(err.kind(), FailureKind::TransactionRejected);
        assert_eq!(node.writer("0xstealth"), None);
    }

    #[tokio::test]
    async fn test_failed_receipt_is_revert() {
        let node = StubNode::start(ACCOUNT).await;
        node.fail_on_mine();

        let err = ledger(&node).register(&stealth("0xstealth")).await.unwrap_err();
        assert_eq!(err, LedgerError::TransactionReverted { reason: None });
        assert_eq!(node.writer("0xstealth"), None);
    }

    #[tokio::test]
    async fn test_receipt_deadline_is_read_error() {
        let node = StubNode::start(ACCOUNT).await;
        node.pending_polls(usize::MAX);
        let config = LedgerConfig {
            receipt_timeout_secs: 1,
            ..LedgerConfig::for_testing().with_rpc_url(node.url())
        };
        let rpc = Arc::new(JsonRpcClient::new(node.url(), Duration::from_secs(1)).unwrap());
        let client = JsonRpcLedgerClient::new(rpc.clone(), JsonRpcWallet::new(rpc), CONTRACT, &config);

        let err = client.register(&stealth("0xstealth")).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::ReadError);
    }

    // =============================================================================
    // READS
    // =============================================================================

    #[tokio::test]
    async fn test_records_round_trip_through_node() {
        let node = StubNode::start(ACCOUNT).await;
        let client = ledger(&node);

        assert_eq!(client.get_records().await.unwrap().titles.len(), 0);

        client.post_blog(&entry("First", "QmOne")).await.unwrap();
        client.post_blog(&entry("Second", "QmTwo")).await.unwrap();

        let records = client.get_records().await.unwrap();
        assert_eq!(records.titles, ["First", "Second"]);
        assert_eq!(records.pointers, ["QmOne", "QmTwo"]);
        assert_eq!(client.blog_count().await.unwrap(), 2);
        assert_eq!(client.blog_at(1).await.unwrap(), entry("Second", "QmTwo"));
    }

    #[tokio::test]
    async fn test_unknown_writer_is_zero_address() {
        let node = StubNode::start(ACCOUNT).await;
        assert_eq!(ledger(&node).writer_address("0xnobody").await.unwrap(), Address::default());
    }

    #[tokio::test]
    async fn test_unreachable_node_is_read_error() {
        let config = LedgerConfig::for_testing().with_rpc_url("http://127.0.0.1:9");
        let rpc = Arc::new(JsonRpcClient::new(config.rpc_url.clone(), Duration::from_secs(1)).unwrap());
        let client = JsonRpcLedgerClient::new(rpc.clone(), JsonRpcWallet::new(rpc), CONTRACT, &config);
        let err = client.get_records().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::ReadError);
    }

    // =============================================================================
    // FULL RUNTIME
    // =============================================================================

    async fn runtime(node: &StubNode, issuer: &StubIssuer) -> WritexRuntime {
        let mut config = WritexConfig::for_testing();
        config.issuer.base_url = issuer.base_url();
        config.ledger.rpc_url = node.url();
        config.ledger.contract_address = Some(CONTRACT);
        WritexRuntime::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_runtime_registers_and_opens_dashboard() {
        let node = StubNode::start(ACCOUNT).await;
        let issuer = StubIssuer::start(IssuerBehavior::Remember).await;
        let rt = runtime(&node, &issuer).await;
        let alias = StubIssuer::alias_for(&ACCOUNT.to_string());

        let state = rt.register().await;
        assert!(matches!(state, RegistrationState::Registered { .. }), "{state}");
        assert_eq!(node.writer(&alias), Some(ACCOUNT));

        let handoff = rt.handoff().unwrap();
        assert_eq!(handoff.stealth_address.as_str(), alias);
        assert!(rt.dashboard_link(&handoff).ends_with(&format!("/blog-page?stealth={alias}")));

        rt.post_blog(&BlogEntry {
            key: alias.clone(),
            ..entry("Hello", "QmHello")
        })
        .await
        .unwrap();
        let view = rt.load_route(&rt.dashboard_link(&handoff)).await.unwrap();
        assert_eq!(view.records.len(), 1);
        assert_eq!(view.records[0].title, "Hello");
    }

    #[tokio::test]
    async fn test_runtime_second_session_skips_ledger() {
        let node = StubNode::start(ACCOUNT).await;
        let issuer = StubIssuer::start(IssuerBehavior::Remember).await;

        let first = runtime(&node, &issuer).await;
        assert!(first.register().await.is_complete());
        let sends = node.count("eth_sendTransaction");

        let second = runtime(&node, &issuer).await;
        let state = second.register().await;
        assert!(matches!(state, RegistrationState::AlreadyRegistered { .. }));
        assert_eq!(node.count("eth_sendTransaction"), sends);
        assert!(second.handoff().is_some());
    }

    #[tokio::test]
    async fn test_runtime_stale_presence_flag_surfaces_revert() {
        let node = StubNode::start(ACCOUNT).await;
        let issuer = StubIssuer::start(IssuerBehavior::Remember).await;
        let alias = StubIssuer::alias_for(&ACCOUNT.to_string());
        node.seed_writer(&alias, ACCOUNT);

        let rt = runtime(&node, &issuer).await;
        let state = rt.register().await;
        assert_eq!(state.failure(), Some(FailureKind::TransactionReverted));
        assert!(rt.handoff().is_none());
        assert_eq!(rt.status().text, "Transaction failed.");
    }

    #[tokio::test]
    async fn test_runtime_wallet_refusal_is_connection_rejected() {
        let node = StubNode::start(ACCOUNT).await;
        let issuer = StubIssuer::start(IssuerBehavior::Remember).await;
        node.lock_accounts();

        let rt = runtime(&node, &issuer).await;
        let state = rt.register().await;
        assert_eq!(
            state,
            RegistrationState::Failed {
                kind: FailureKind::ConnectionRejected,
                stage: Stage::Wallet
            }
        );
        assert_eq!(rt.status().text, "Failed to connect wallet.");
        assert_eq!(node.count("eth_sendTransaction"), 0);
    }

    #[tokio::test]
    async fn test_runtime_dashboard_rejects_uneven_sequences() {
        let node = StubNode::start(ACCOUNT).await;
        let issuer = StubIssuer::start(IssuerBehavior::Remember).await;
        node.seed_sequences(vec!["A".into(), "B".into()], vec!["h1".into()]);

        let rt = runtime(&node, &issuer).await;
        let err = rt.load_dashboard("0xstealth").await.unwrap_err();
        assert_eq!(err.kind(), Some(FailureKind::MalformedResponse));
    }
}
