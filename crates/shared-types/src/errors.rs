//! # Error Types
//!
//! The failure taxonomy shared by every subsystem, plus parse errors for
//! the validated entity constructors.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every way a registration or dashboard attempt can fail.
///
/// All kinds are terminal for the current attempt; nothing is retried
/// automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// No wallet provider is reachable, or it reported no account.
    WalletUnavailable,
    /// The participant declined the wallet connection request.
    ConnectionRejected,
    /// The issuance service gave no usable response (includes timeouts).
    BackendUnreachable,
    /// A collaborator answered with a payload missing required fields,
    /// or the ledger returned sequences of unequal length.
    MalformedResponse,
    /// The signer declined the ledger transaction.
    TransactionRejected,
    /// The ledger rejected the transaction (e.g. duplicate registration).
    TransactionReverted,
    /// A ledger query failed (includes timeouts).
    ReadError,
}

impl FailureKind {
    /// Short message shown to the participant for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::WalletUnavailable => "No wallet provider is available.",
            Self::ConnectionRejected => "Failed to connect wallet.",
            Self::BackendUnreachable => "Error connecting to backend services.",
            Self::MalformedResponse => "Received an invalid response.",
            Self::TransactionRejected => "Transaction was rejected in the wallet.",
            Self::TransactionReverted => "Transaction failed.",
            Self::ReadError => "Failed to read from the ledger.",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::WalletUnavailable => "WalletUnavailable",
            Self::ConnectionRejected => "ConnectionRejected",
            Self::BackendUnreachable => "BackendUnreachable",
            Self::MalformedResponse => "MalformedResponse",
            Self::TransactionRejected => "TransactionRejected",
            Self::TransactionReverted => "TransactionReverted",
            Self::ReadError => "ReadError",
        };
        f.write_str(name)
    }
}

/// Errors raised by the validated constructors in [`crate::entities`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A required identifier was empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// A hex string could not be decoded.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// A hex value decoded to the wrong number of bytes.
    #[error("Invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
}
