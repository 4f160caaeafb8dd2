//! # Domain Errors
//!
//! Error types for the ledger client.

use shared_types::FailureKind;
use thiserror::Error;

/// ABI decoding errors. Decoding never panics; malformed input ends here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// A read ran past the end of the payload.
    #[error("ABI payload truncated: need {needed} bytes at offset {offset}, have {len}")]
    Truncated {
        /// Offset of the failed read
        offset: usize,
        /// Bytes needed from that offset
        needed: usize,
        /// Total payload length
        len: usize,
    },

    /// An offset or length word does not fit the payload.
    #[error("ABI value out of range: {0}")]
    ValueOutOfRange(String),

    /// A decoded string is not valid UTF-8.
    #[error("ABI string is not valid UTF-8")]
    InvalidUtf8,
}

/// Wallet (signing capability) errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// No wallet is reachable or it exposes no account.
    #[error("Wallet unavailable: {0}")]
    Unavailable(String),

    /// The participant declined the request.
    #[error("Request rejected by user: {0}")]
    Rejected(String),

    /// The wallet accepted the request but the node refused the transaction.
    #[error("Wallet request failed: {0}")]
    Failed(String),
}

/// Ledger client error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No signing capability is available.
    #[error("Wallet unavailable: {0}")]
    WalletUnavailable(String),

    /// The signer declined the transaction.
    #[error("Transaction rejected by signer: {0}")]
    UserRejected(String),

    /// The ledger rejected the transaction.
    #[error("Transaction reverted: {}", reason.as_deref().unwrap_or("no reason given"))]
    TransactionReverted {
        /// Decoded revert reason, when the ledger supplied one.
        reason: Option<String>,
    },

    /// A query failed, timed out, or returned an undecodable payload.
    #[error("Ledger read failed: {0}")]
    ReadError(String),
}

impl LedgerError {
    /// Map onto the shared failure taxonomy.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::WalletUnavailable(_) => FailureKind::WalletUnavailable,
            Self::UserRejected(_) => FailureKind::TransactionRejected,
            Self::TransactionReverted { .. } => FailureKind::TransactionReverted,
            Self::ReadError(_) => FailureKind::ReadError,
        }
    }

    /// Revert with a reason.
    pub fn reverted(reason: impl Into<String>) -> Self {
        Self::TransactionReverted {
            reason: Some(reason.into()),
        }
    }
}

impl From<WalletError> for LedgerError {
    fn from(e: WalletError) -> Self {
        match e {
            WalletError::Unavailable(msg) => Self::WalletUnavailable(msg),
            WalletError::Rejected(msg) => Self::UserRejected(msg),
            WalletError::Failed(msg) => Self::TransactionReverted { reason: Some(msg) },
        }
    }
}

impl From<AbiError> for LedgerError {
    fn from(e: AbiError) -> Self {
        Self::ReadError(e.to_string())
    }
}
