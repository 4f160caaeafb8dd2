//! # Outbound Ports
//!
//! The signing capability the ledger client depends on.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{Address, TxHash};

use crate::domain::{abi, TransactionRequest, WalletError};

/// Wallet - outbound port.
///
/// Exposes the participant's current address and signs/submits transactions.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// The account the wallet currently signs for.
    async fn current_address(&self) -> Result<Address, WalletError>;

    /// Sign and submit; returns the transaction hash without waiting for it
    /// to be mined.
    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, WalletError>;
}

#[async_trait]
impl<W: WalletProvider + ?Sized> WalletProvider for Arc<W> {
    async fn current_address(&self) -> Result<Address, WalletError> {
        (**self).current_address().await
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, WalletError> {
        (**self).send_transaction(request).await
    }
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Scripted wallet.
pub struct MockWallet {
    /// Account to report; `None` means no wallet is connected.
    pub address: Option<Address>,
    /// Decline every signing request.
    pub reject: bool,
    sent: Mutex<Vec<TransactionRequest>>,
    nonce: AtomicU64,
}

impl Default for MockWallet {
    fn default() -> Self {
        Self::new(Address([0x11; 20]))
    }
}

impl MockWallet {
    /// Wallet connected as `address`.
    pub fn new(address: Address) -> Self {
        Self {
            address: Some(address),
            reject: false,
            sent: Mutex::new(Vec::new()),
            nonce: AtomicU64::new(0),
        }
    }

    /// No wallet available.
    pub fn disconnected() -> Self {
        Self {
            address: None,
            ..Self::default()
        }
    }

    /// Wallet whose user declines every transaction.
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    /// Transactions submitted so far.
    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn current_address(&self) -> Result<Address, WalletError> {
        self.address
            .ok_or_else(|| WalletError::Unavailable("no wallet connected".into()))
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, WalletError> {
        self.current_address().await?;
        if self.reject {
            return Err(WalletError::Rejected("User denied transaction signature".into()));
        }
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        let mut preimage = request.data.clone();
        preimage.extend_from_slice(&nonce.to_be_bytes());
        self.sent.lock().push(request);
        Ok(TxHash(abi::keccak256(&preimage)))
    }
}
