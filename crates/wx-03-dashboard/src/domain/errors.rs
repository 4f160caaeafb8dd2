//! # Domain Errors

use shared_types::FailureKind;
use thiserror::Error;

/// Dashboard error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// The ledger returned parallel sequences of different lengths.
    #[error("Malformed record list: {titles} titles but {pointers} content pointers")]
    MalformedResponse {
        /// Number of titles returned
        titles: usize,
        /// Number of content pointers returned
        pointers: usize,
    },

    /// The navigation handoff did not carry a usable stealth address.
    #[error("Invalid dashboard handoff: {0}")]
    InvalidHandoff(String),

    /// The record source failed.
    #[error("Record source failed ({kind}): {message}")]
    Source {
        /// Failure classification from the source
        kind: FailureKind,
        /// Source error text
        message: String,
    },
}

impl DashboardError {
    /// Map onto the shared failure taxonomy.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MalformedResponse { .. } | Self::InvalidHandoff(_) => {
                FailureKind::MalformedResponse
            }
            Self::Source { kind, .. } => *kind,
        }
    }
}
