//! # Outbound Ports
//!
//! Collaborators the coordinator drives: the wallet, the stealth issuer, the
//! writer registry on the ledger, and the dashboard handoff.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{
    FailureKind, RealIdentity, Receipt, StealthAddress, StealthIdentity, TxHash,
};

use crate::domain::RegistrationError;

/// Wallet identity - outbound port.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The participant's real identity.
    async fn current_identity(&self) -> Result<RealIdentity, RegistrationError>;
}

/// Stealth identity issuance - outbound port.
#[async_trait]
pub trait StealthIssuance: Send + Sync {
    /// Mint or re-issue the stealth identity for `identity`.
    async fn issue(&self, identity: &RealIdentity) -> Result<StealthIdentity, RegistrationError>;
}

/// Ledger writer registry - outbound port.
#[async_trait]
pub trait WriterRegistry: Send + Sync {
    /// Register the stealth identity and wait for confirmation.
    async fn register(&self, identity: &StealthIdentity) -> Result<Receipt, RegistrationError>;
}

/// Dashboard handoff - outbound port.
pub trait HandoffSink: Send + Sync {
    /// Receive the stealth identity of a completed handshake.
    fn hand_off(&self, identity: StealthIdentity);
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================
//
// Each mock yields once before answering so concurrent triggers interleave
// the way real network calls do.

/// Scripted wallet identity.
pub struct MockIdentityProvider {
    result: Result<RealIdentity, RegistrationError>,
    calls: AtomicUsize,
}

impl MockIdentityProvider {
    /// Wallet reporting `identity`.
    pub fn new(identity: RealIdentity) -> Self {
        Self {
            result: Ok(identity),
            calls: AtomicUsize::new(0),
        }
    }

    /// Wallet failing with `kind`.
    pub fn failing(kind: FailureKind) -> Self {
        Self {
            result: Err(kind.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of identity requests.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn current_identity(&self) -> Result<RealIdentity, RegistrationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.result.clone()
    }
}

/// In-memory issuer: stable address per identity, presence flag set from the
/// second issuance on.
#[derive(Default)]
pub struct MockIssuance {
    issued: Mutex<HashMap<RealIdentity, StealthAddress>>,
    failure: Mutex<Option<RegistrationError>>,
    calls: AtomicUsize,
}

impl MockIssuance {
    /// Issuer with no prior mappings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issuer that already mapped `identity` to `address`.
    pub fn with_existing(identity: RealIdentity, address: StealthAddress) -> Self {
        let issuer = Self::default();
        issuer.issued.lock().insert(identity, address);
        issuer
    }

    /// Fail every call with `kind` until cleared.
    pub fn fail_with(&self, kind: FailureKind) {
        *self.failure.lock() = Some(kind.into());
    }

    /// Stop failing.
    pub fn clear_failure(&self) {
        *self.failure.lock() = None;
    }

    /// Number of issuance requests.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StealthIssuance for MockIssuance {
    async fn issue(&self, identity: &RealIdentity) -> Result<StealthIdentity, RegistrationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if let Some(error) = self.failure.lock().clone() {
            return Err(error);
        }

        let mut issued = self.issued.lock();
        if let Some(address) = issued.get(identity) {
            return Ok(StealthIdentity::existing(address.clone()));
        }
        let address = StealthAddress::new(format!("0xstealth{:04}", issued.len() + 1))
            .map_err(|e| RegistrationError::new(FailureKind::MalformedResponse, e.to_string()))?;
        issued.insert(identity.clone(), address.clone());
        Ok(StealthIdentity::fresh(address))
    }
}

/// In-memory registry: duplicate keys revert like the contract does.
#[derive(Default)]
pub struct MockRegistry {
    registered: Mutex<Vec<StealthIdentity>>,
    failure: Mutex<Option<RegistrationError>>,
    calls: AtomicUsize,
}

impl MockRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call with `kind` until cleared.
    pub fn fail_with(&self, kind: FailureKind) {
        *self.failure.lock() = Some(kind.into());
    }

    /// Stop failing.
    pub fn clear_failure(&self) {
        *self.failure.lock() = None;
    }

    /// Number of registration submissions.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Identities registered so far.
    pub fn registered(&self) -> Vec<StealthIdentity> {
        self.registered.lock().clone()
    }
}

#[async_trait]
impl WriterRegistry for MockRegistry {
    async fn register(&self, identity: &StealthIdentity) -> Result<Receipt, RegistrationError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if let Some(error) = self.failure.lock().clone() {
            return Err(error);
        }

        let mut registered = self.registered.lock();
        if registered.iter().any(|r| r.address == identity.address) {
            return Err(RegistrationError::new(
                FailureKind::TransactionReverted,
                "Writer already exists",
            ));
        }
        registered.push(identity.clone());
        Ok(Receipt::new(TxHash([n as u8 + 1; 32])))
    }
}

/// Records every handoff.
#[derive(Default)]
pub struct MockHandoffSink {
    received: Mutex<Vec<StealthIdentity>>,
}

impl MockHandoffSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handoffs received so far.
    pub fn received(&self) -> Vec<StealthIdentity> {
        self.received.lock().clone()
    }
}

impl HandoffSink for MockHandoffSink {
    fn hand_off(&self, identity: StealthIdentity) {
        self.received.lock().push(identity);
    }
}
