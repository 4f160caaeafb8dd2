//! # Value Objects
//!
//! Request/response bodies of `POST /create-writer` and their validation.

use serde::{Deserialize, Serialize};
use shared_types::{RealIdentity, StealthAddress, StealthIdentity};

use super::errors::IssuerError;

/// Route of the issuance endpoint, relative to the service base URL.
pub const CREATE_WRITER_PATH: &str = "/create-writer";

/// Value of `present` that marks an identity as already registered.
pub const PRESENT_MARKER: &str = "already";

/// Body sent to the issuance service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWriterRequest {
    /// The participant's real identity.
    pub address: String,
}

impl CreateWriterRequest {
    /// Build the request for an identity.
    pub fn for_identity(identity: &RealIdentity) -> Self {
        Self {
            address: identity.as_str().to_string(),
        }
    }
}

/// Body returned by the issuance service, before validation.
///
/// Every field is optional here so that a missing field becomes a
/// `MalformedResponse` rather than an opaque decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateWriterResponse {
    /// The issued alias.
    #[serde(rename = "stealthAddress", default, skip_serializing_if = "Option::is_none")]
    pub stealth_address: Option<String>,

    /// Presence marker; only `"already"` means the identity was known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present: Option<serde_json::Value>,
}

impl CreateWriterResponse {
    /// Response for a first-time issuance.
    pub fn issued(stealth_address: impl Into<String>) -> Self {
        Self {
            stealth_address: Some(stealth_address.into()),
            present: None,
        }
    }

    /// Response for a re-issued identity.
    pub fn reissued(stealth_address: impl Into<String>) -> Self {
        Self {
            stealth_address: Some(stealth_address.into()),
            present: Some(serde_json::Value::String(PRESENT_MARKER.to_string())),
        }
    }

    /// True only when `present == "already"`.
    pub fn is_present(&self) -> bool {
        matches!(&self.present, Some(serde_json::Value::String(s)) if s == PRESENT_MARKER)
    }

    /// Validate into a [`StealthIdentity`].
    pub fn into_identity(self) -> Result<StealthIdentity, IssuerError> {
        let already_registered = self.is_present();
        let raw = self.stealth_address.ok_or_else(|| {
            IssuerError::MalformedResponse("missing field `stealthAddress`".to_string())
        })?;
        let address = StealthAddress::new(raw)
            .map_err(|e| IssuerError::MalformedResponse(e.to_string()))?;

        Ok(StealthIdentity {
            address,
            already_registered,
        })
    }

    /// Parse and validate a raw response body.
    pub fn parse(body: &[u8]) -> Result<StealthIdentity, IssuerError> {
        let response: Self = serde_json::from_slice(body)
            .map_err(|e| IssuerError::MalformedResponse(e.to_string()))?;
        response.into_identity()
    }
}
