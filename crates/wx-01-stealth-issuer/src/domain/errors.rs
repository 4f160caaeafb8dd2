//! # Domain Errors
//!
//! Error types for the stealth issuer client.

use shared_types::FailureKind;
use thiserror::Error;

/// Stealth issuer error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssuerError {
    /// No usable response: connect failure, timeout, or non-success status.
    #[error("Issuance service unreachable: {0}")]
    BackendUnreachable(String),

    /// The service answered, but the payload is missing required fields.
    #[error("Malformed issuance response: {0}")]
    MalformedResponse(String),
}

impl IssuerError {
    /// Map onto the shared failure taxonomy.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::BackendUnreachable(_) => FailureKind::BackendUnreachable,
            Self::MalformedResponse(_) => FailureKind::MalformedResponse,
        }
    }
}

impl From<reqwest::Error> for IssuerError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::MalformedResponse(e.to_string())
        } else if e.is_timeout() {
            Self::BackendUnreachable(format!("request timed out: {e}"))
        } else {
            Self::BackendUnreachable(e.to_string())
        }
    }
}
