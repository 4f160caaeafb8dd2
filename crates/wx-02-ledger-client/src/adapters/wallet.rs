//! Wallet adapter over an EIP-1193 style JSON-RPC bridge.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use shared_types::{Address, TxHash};
use tracing::{debug, info, warn};

use super::rpc::{JsonRpcClient, RpcError, METHOD_NOT_FOUND_CODE, USER_REJECTED_CODE};
use crate::domain::{TransactionRequest, WalletError};
use crate::ports::WalletProvider;

/// Wallet backed by a JSON-RPC endpoint that holds the participant's keys.
///
/// The account is requested once and cached for the session.
pub struct JsonRpcWallet {
    rpc: Arc<JsonRpcClient>,
    account: Mutex<Option<Address>>,
}

impl JsonRpcWallet {
    /// Create a wallet over a shared RPC client.
    pub fn new(rpc: Arc<JsonRpcClient>) -> Self {
        Self {
            rpc,
            account: Mutex::new(None),
        }
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, RpcError> {
        match self
            .rpc
            .call::<_, Vec<Address>>("eth_requestAccounts", json!([]))
            .await
        {
            Err(RpcError::Rpc { code, .. }) if code == METHOD_NOT_FOUND_CODE => {
                debug!("[wx-02] eth_requestAccounts unsupported, using eth_accounts");
                self.rpc.call("eth_accounts", json!([])).await
            }
            other => other,
        }
    }
}

fn wallet_error(e: RpcError) -> WalletError {
    match e {
        RpcError::Rpc { code, message, .. } if code == USER_REJECTED_CODE => {
            WalletError::Rejected(message)
        }
        e if e.is_unreachable() => WalletError::Unavailable(e.to_string()),
        e => match e.revert_reason() {
            Some(reason) => WalletError::Failed(reason),
            None => WalletError::Failed(e.to_string()),
        },
    }
}

#[async_trait]
impl WalletProvider for JsonRpcWallet {
    async fn current_address(&self) -> Result<Address, WalletError> {
        if let Some(address) = *self.account.lock() {
            return Ok(address);
        }

        let accounts = self.request_accounts().await.map_err(wallet_error)?;

        let address = accounts.first().copied().ok_or_else(|| {
            warn!("[wx-02] Wallet at {} exposes no accounts", self.rpc.url());
            WalletError::Unavailable("wallet exposes no accounts".into())
        })?;

        info!("[wx-02] Wallet connected: {}", address);
        *self.account.lock() = Some(address);
        Ok(address)
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, WalletError> {
        debug!("[wx-02] eth_sendTransaction to {}", request.to);
        self.rpc
            .call("eth_sendTransaction", json!([request]))
            .await
            .map_err(wallet_error)
    }
}
