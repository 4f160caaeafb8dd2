//! # Domain Errors

use shared_types::FailureKind;
use thiserror::Error;

/// Failure reported by a collaborator port.
///
/// Adapters classify their own errors; the coordinator only looks at
/// [`RegistrationError::kind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct RegistrationError {
    /// Failure classification
    pub kind: FailureKind,
    /// Collaborator error text
    pub message: String,
}

impl RegistrationError {
    /// Create an error.
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Failure classification.
    pub fn kind(&self) -> FailureKind {
        self.kind
    }
}

impl From<FailureKind> for RegistrationError {
    fn from(kind: FailureKind) -> Self {
        Self::new(kind, kind.user_message())
    }
}
