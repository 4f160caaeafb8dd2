//! # Runtime Container
//!
//! Builds the wallet, issuer and ledger clients from [`WritexConfig`] and
//! wires them into the registration coordinator and the dashboard service.

use std::sync::Arc;

use shared_types::{Address, FailureKind, Receipt, StatusMessage, StealthAddress};
use thiserror::Error;
use tokio::sync::watch;
use tracing::info;
use wx_01_stealth_issuer::{HttpStealthIssuer, IssuerError, StealthIssuer};
use wx_02_ledger_client::{
    BlogEntry, JsonRpcClient, JsonRpcLedgerClient, JsonRpcWallet, LedgerClient, LedgerError,
    RpcError, WalletProvider,
};
use wx_03_dashboard::{DashboardApi, DashboardError, DashboardHandoff, DashboardService, DashboardView};
use wx_04_registration::{RegistrationApi, RegistrationCoordinator, RegistrationState};

use super::config::{ConfigError, WritexConfig};
use crate::adapters::{HandoffSlot, IssuerBridge, LedgerRecordSource, LedgerRegistry, WalletIdentity};

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration was missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The JSON-RPC client could not be built.
    #[error("Ledger client setup failed: {0}")]
    Rpc(#[from] RpcError),

    /// The issuer client could not be built.
    #[error("Issuer client setup failed: {0}")]
    Issuer(#[from] IssuerError),

    /// A ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The dashboard could not be loaded.
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
}

impl RuntimeError {
    /// Failure classification, where one applies.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::Config(_) | Self::Rpc(_) => None,
            Self::Issuer(e) => Some(e.kind()),
            Self::Ledger(e) => Some(e.kind()),
            Self::Dashboard(e) => Some(e.kind()),
        }
    }
}

/// All subsystems of one `writex` session.
pub struct WritexRuntime {
    config: WritexConfig,
    ledger: Arc<dyn LedgerClient>,
    coordinator: RegistrationCoordinator,
    dashboard: DashboardService<LedgerRecordSource>,
    handoff: Arc<HandoffSlot>,
}

impl WritexRuntime {
    /// Build the JSON-RPC and HTTP clients described by `config`.
    pub fn new(config: WritexConfig) -> Result<Self, RuntimeError> {
        let contract = config.validate()?;

        let rpc = Arc::new(JsonRpcClient::new(
            config.ledger.rpc_url.clone(),
            config.ledger.request_timeout(),
        )?);
        let wallet = Arc::new(JsonRpcWallet::new(rpc.clone()));
        let ledger = Arc::new(JsonRpcLedgerClient::new(
            rpc,
            wallet.clone(),
            contract,
            &config.ledger,
        ));
        let issuer = Arc::new(HttpStealthIssuer::new(&config.issuer)?);

        info!(
            "[wx-rt] Issuer {} | ledger {} | contract {}",
            config.issuer.base_url, config.ledger.rpc_url, contract
        );
        Ok(Self::with_components(config, wallet, issuer, ledger))
    }

    /// Wire pre-built collaborators.
    pub fn with_components(
        config: WritexConfig,
        wallet: Arc<dyn WalletProvider>,
        issuer: Arc<dyn StealthIssuer>,
        ledger: Arc<dyn LedgerClient>,
    ) -> Self {
        let handoff = Arc::new(HandoffSlot::new());
        let coordinator = RegistrationCoordinator::new(
            Arc::new(WalletIdentity::new(wallet)),
            Arc::new(IssuerBridge::new(issuer)),
            Arc::new(LedgerRegistry::new(ledger.clone())),
            handoff.clone(),
        );
        let dashboard = DashboardService::new(
            config.dashboard.clone(),
            LedgerRecordSource::new(ledger.clone()),
        );

        Self {
            config,
            ledger,
            coordinator,
            dashboard,
            handoff,
        }
    }

    /// Resolved configuration.
    pub fn config(&self) -> &WritexConfig {
        &self.config
    }

    /// Run the registration handshake and return the state it ended in.
    pub async fn register(&self) -> RegistrationState {
        self.coordinator.begin().await
    }

    /// Current registration status line.
    pub fn status(&self) -> StatusMessage {
        self.coordinator.status()
    }

    /// Observe registration status changes.
    pub fn subscribe(&self) -> watch::Receiver<StatusMessage> {
        self.coordinator.subscribe()
    }

    /// The dashboard handoff, once registration completed.
    pub fn handoff(&self) -> Option<DashboardHandoff> {
        self.handoff.get()
    }

    /// Absolute dashboard link for a handoff.
    pub fn dashboard_link(&self, handoff: &DashboardHandoff) -> String {
        self.dashboard.link_for(handoff)
    }

    /// Load the dashboard for a stealth address.
    pub async fn load_dashboard(&self, stealth: &str) -> Result<DashboardView, RuntimeError> {
        let address = StealthAddress::new(stealth)
            .map_err(|e| DashboardError::InvalidHandoff(e.to_string()))?;
        Ok(self.dashboard.load(&DashboardHandoff::new(address)).await?)
    }

    /// Load the dashboard from a `/blog-page?stealth=...` route or link.
    pub async fn load_route(&self, route: &str) -> Result<DashboardView, RuntimeError> {
        Ok(self.dashboard.load_route(route).await?)
    }

    /// Ledger address bound to a writer key; zero when unknown.
    pub async fn writer_address(&self, key: &str) -> Result<Address, RuntimeError> {
        Ok(self.ledger.writer_address(key).await?)
    }

    /// Publish a record.
    pub async fn post_blog(&self, entry: &BlogEntry) -> Result<Receipt, RuntimeError> {
        info!("[wx-rt] Publishing '{}'", entry.title);
        Ok(self.ledger.post_blog(entry).await?)
    }
}
