//! # Registration Port Adapters
//!
//! Implements the outbound port traits required by wx-04-registration.
//!
//! ## Ports Implemented
//!
//! - `IdentityProvider` - Delegates to the wx-02 wallet
//! - `StealthIssuance` - Delegates to the wx-01 issuer client
//! - `WriterRegistry` - Delegates to the wx-02 ledger client
//! - `HandoffSink` - Keeps the handoff for the dashboard

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{FailureKind, RealIdentity, Receipt, StealthIdentity};
use tracing::debug;
use wx_01_stealth_issuer::{IssuerError, StealthIssuer};
use wx_02_ledger_client::{LedgerClient, LedgerError, WalletError, WalletProvider};
use wx_03_dashboard::DashboardHandoff;
use wx_04_registration::{
    HandoffSink, IdentityProvider, RegistrationError, StealthIssuance, WriterRegistry,
};

// =============================================================================
// IdentityProvider Adapter
// =============================================================================

/// Reads the real identity from the connected wallet.
pub struct WalletIdentity {
    wallet: Arc<dyn WalletProvider>,
}

impl WalletIdentity {
    /// Wrap a wallet provider.
    pub fn new(wallet: Arc<dyn WalletProvider>) -> Self {
        Self { wallet }
    }
}

fn wallet_failure(error: WalletError) -> RegistrationError {
    let kind = match &error {
        WalletError::Unavailable(_) => FailureKind::WalletUnavailable,
        WalletError::Rejected(_) | WalletError::Failed(_) => FailureKind::ConnectionRejected,
    };
    RegistrationError::new(kind, error.to_string())
}

#[async_trait]
impl IdentityProvider for WalletIdentity {
    async fn current_identity(&self) -> Result<RealIdentity, RegistrationError> {
        let address = self.wallet.current_address().await.map_err(wallet_failure)?;
        debug!("[wx-rt] Wallet account {}", address);
        RealIdentity::new(address.to_string())
            .map_err(|e| RegistrationError::new(FailureKind::WalletUnavailable, e.to_string()))
    }
}

// =============================================================================
// StealthIssuance Adapter
// =============================================================================

/// Forwards issuance to the stealth issuer client.
pub struct IssuerBridge {
    issuer: Arc<dyn StealthIssuer>,
}

impl IssuerBridge {
    /// Wrap a stealth issuer client.
    pub fn new(issuer: Arc<dyn StealthIssuer>) -> Self {
        Self { issuer }
    }
}

#[async_trait]
impl StealthIssuance for IssuerBridge {
    async fn issue(&self, identity: &RealIdentity) -> Result<StealthIdentity, RegistrationError> {
        self.issuer
            .issue(identity)
            .await
            .map_err(|e: IssuerError| RegistrationError::new(e.kind(), e.to_string()))
    }
}

// =============================================================================
// WriterRegistry Adapter
// =============================================================================

/// Registers writers through the ledger client.
pub struct LedgerRegistry {
    ledger: Arc<dyn LedgerClient>,
}

impl LedgerRegistry {
    /// Wrap a ledger client.
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl WriterRegistry for LedgerRegistry {
    async fn register(&self, identity: &StealthIdentity) -> Result<Receipt, RegistrationError> {
        self.ledger
            .register(identity)
            .await
            .map_err(|e: LedgerError| RegistrationError::new(e.kind(), e.to_string()))
    }
}

// =============================================================================
// HandoffSink Adapter
// =============================================================================

/// Holds the dashboard handoff produced by a completed handshake.
#[derive(Default)]
pub struct HandoffSlot {
    slot: Mutex<Option<DashboardHandoff>>,
}

impl HandoffSlot {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The handoff, once delivered.
    pub fn get(&self) -> Option<DashboardHandoff> {
        self.slot.lock().clone()
    }
}

impl HandoffSink for HandoffSlot {
    fn hand_off(&self, identity: StealthIdentity) {
        *self.slot.lock() = Some(DashboardHandoff::from(identity.address));
    }
}
