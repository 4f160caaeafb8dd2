//! # Inbound Ports
//!
//! API trait defining what the stealth issuer client can do.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use shared_types::{RealIdentity, StealthAddress, StealthIdentity};

use crate::domain::IssuerError;

/// Stealth issuer - inbound port.
///
/// Implementations must be safe to call more than once with the same
/// identity: the address is stable and the presence flag is `true` on every
/// call after the first.
#[async_trait]
pub trait StealthIssuer: Send + Sync {
    /// Mint (or re-issue) the stealth identity for a real identity.
    async fn issue(&self, identity: &RealIdentity) -> Result<StealthIdentity, IssuerError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// In-memory issuer that derives a stable alias from the real identity.
///
/// Keeps the identity → alias mapping the remote service would persist, so
/// repeat calls report `already_registered = true`.
pub struct MockStealthIssuer {
    /// Mixed into every derived alias.
    salt: String,
    /// Issued aliases.
    issued: Mutex<HashMap<RealIdentity, StealthAddress>>,
    /// Number of `issue` calls.
    calls: AtomicUsize,
    /// Error returned by every call instead of issuing.
    failure: Option<IssuerError>,
}

impl Default for MockStealthIssuer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStealthIssuer {
    /// Create an issuer with no known identities.
    pub fn new() -> Self {
        Self {
            salt: "writex-mock".to_string(),
            issued: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            failure: None,
        }
    }

    /// Create an issuer that fails every call with `error`.
    pub fn failing(error: IssuerError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new()
        }
    }

    /// Mark `identity` as already issued, as if from an earlier session.
    pub fn with_known(self, identity: &RealIdentity) -> Self {
        if let Ok(address) = self.derive(identity) {
            self.issued.lock().insert(identity.clone(), address);
        }
        self
    }

    /// Number of `issue` calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The alias this issuer derives for `identity`.
    pub fn derive(&self, identity: &RealIdentity) -> Result<StealthAddress, IssuerError> {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(identity.as_str().as_bytes());
        let digest = hasher.finalize();
        StealthAddress::new(format!("0x{}", hex::encode(digest)))
            .map_err(|e| IssuerError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl StealthIssuer for MockStealthIssuer {
    async fn issue(&self, identity: &RealIdentity) -> Result<StealthIdentity, IssuerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let mut issued = self.issued.lock();
        if let Some(address) = issued.get(identity) {
            return Ok(StealthIdentity::existing(address.clone()));
        }

        let address = self.derive(identity)?;
        issued.insert(identity.clone(), address.clone());
        Ok(StealthIdentity::fresh(address))
    }
}
