//! Ledger adapter: `eth_call` reads and wallet-signed writes with receipt
//! polling.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use primitive_types::U256;
use serde::Deserialize;
use serde_json::json;
use shared_types::{Address, Receipt, RecordSequences, StealthIdentity, TxHash};
use tracing::{debug, info, warn};

use super::rpc::{decode_hex_bytes, encode_hex_bytes, parse_quantity, JsonRpcClient, RpcError};
use crate::config::LedgerConfig;
use crate::domain::{abi, BlogEntry, ContractCall, LedgerError, TransactionRequest};
use crate::ports::{LedgerClient, WalletProvider};

/// Receipt as returned by `eth_getTransactionReceipt`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    #[serde(default)]
    block_number: Option<String>,
    #[serde(default)]
    gas_used: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl RpcReceipt {
    fn into_receipt(self, tx_hash: TxHash) -> Result<Receipt, LedgerError> {
        if self.status.as_deref() == Some("0x0") {
            return Err(LedgerError::TransactionReverted { reason: None });
        }
        let quantity = |q: Option<String>| q.and_then(|s| parse_quantity(&s).ok());
        Ok(Receipt {
            tx_hash,
            block_number: quantity(self.block_number),
            gas_used: quantity(self.gas_used),
        })
    }
}

/// Writer registry client over JSON-RPC.
pub struct JsonRpcLedgerClient<W: WalletProvider> {
    rpc: Arc<JsonRpcClient>,
    wallet: W,
    contract: Address,
    receipt_timeout: Duration,
    poll_interval: Duration,
}

impl<W: WalletProvider> JsonRpcLedgerClient<W> {
    /// Create a client for the registry at `contract`.
    pub fn new(rpc: Arc<JsonRpcClient>, wallet: W, contract: Address, config: &LedgerConfig) -> Self {
        Self {
            rpc,
            wallet,
            contract,
            receipt_timeout: config.receipt_timeout(),
            poll_interval: config.poll_interval(),
        }
    }

    /// Registry contract address.
    pub fn contract(&self) -> Address {
        self.contract
    }

    /// The signing wallet.
    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    async fn read(&self, call: ContractCall) -> Result<Vec<u8>, LedgerError> {
        debug!("[wx-02] eth_call {}", call.name());
        let params = json!([
            { "to": self.contract, "data": encode_hex_bytes(&call.encode()) },
            "latest"
        ]);
        let result: String = self
            .rpc
            .call("eth_call", params)
            .await
            .map_err(|e| LedgerError::ReadError(format!("{}: {}", call.name(), e)))?;
        decode_hex_bytes(&result).map_err(LedgerError::ReadError)
    }

    async fn submit(&self, call: ContractCall) -> Result<Receipt, LedgerError> {
        let from = self.wallet.current_address().await?;
        let request = TransactionRequest::for_call(from, self.contract, &call);

        self.preflight(&call, &request).await?;

        let tx_hash = self.wallet.send_transaction(request).await?;
        info!("[wx-02] {} submitted: {}", call.name(), tx_hash);

        let receipt = self.await_receipt(tx_hash).await?;
        info!(
            "[wx-02] {} mined in block {:?}",
            call.name(),
            receipt.block_number
        );
        Ok(receipt)
    }

    /// Simulate the write so a revert surfaces with its reason before the
    /// participant is asked to sign.
    async fn preflight(
        &self,
        call: &ContractCall,
        request: &TransactionRequest,
    ) -> Result<(), LedgerError> {
        match self
            .rpc
            .call::<_, String>("eth_call", json!([request, "latest"]))
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if e.is_unreachable() => Err(LedgerError::WalletUnavailable(e.to_string())),
            Err(e) => {
                let reason = e.revert_reason().or_else(|| match &e {
                    RpcError::Rpc { message, .. } => Some(message.clone()),
                    _ => None,
                });
                warn!(
                    "[wx-02] {} would revert: {}",
                    call.name(),
                    reason.as_deref().unwrap_or("no reason given")
                );
                Err(LedgerError::TransactionReverted { reason })
            }
        }
    }

    async fn await_receipt(&self, tx_hash: TxHash) -> Result<Receipt, LedgerError> {
        let poll = async {
            loop {
                match self
                    .rpc
                    .call::<_, Option<RpcReceipt>>("eth_getTransactionReceipt", json!([tx_hash]))
                    .await
                {
                    Ok(Some(receipt)) => return receipt.into_receipt(tx_hash),
                    Ok(None) => debug!("[wx-02] {} pending", tx_hash),
                    Err(RpcError::Parse(msg)) => return Err(LedgerError::ReadError(msg)),
                    Err(e) => warn!("[wx-02] Receipt poll for {} failed: {}", tx_hash, e),
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        };

        tokio::time::timeout(self.receipt_timeout, poll)
            .await
            .map_err(|_| {
                LedgerError::ReadError(format!(
                    "receipt for {} not observed within {:?}",
                    tx_hash, self.receipt_timeout
                ))
            })?
    }
}

#[async_trait]
impl<W: WalletProvider> LedgerClient for JsonRpcLedgerClient<W> {
    async fn register(&self, identity: &StealthIdentity) -> Result<Receipt, LedgerError> {
        self.submit(ContractCall::NewWriter {
            key: identity.address.as_str().to_string(),
        })
        .await
    }

    async fn get_records(&self) -> Result<RecordSequences, LedgerError> {
        let data = self.read(ContractCall::GetBlogs).await?;
        let (titles, pointers) = abi::decode_string_array_pair(&data)?;
        debug!(
            "[wx-02] getBlogs returned {} titles, {} pointers",
            titles.len(),
            pointers.len()
        );
        Ok(RecordSequences { titles, pointers })
    }

    async fn writer_address(&self, key: &str) -> Result<Address, LedgerError> {
        let data = self
            .read(ContractCall::Addresses {
                key: key.to_string(),
            })
            .await?;
        Ok(abi::decode_address(&data)?)
    }

    async fn blog_count(&self) -> Result<u64, LedgerError> {
        let data = self.read(ContractCall::BlogCount).await?;
        let count = abi::decode_uint(&data)?;
        if count > U256::from(u64::MAX) {
            return Err(LedgerError::ReadError(format!("blog count {count} out of range")));
        }
        Ok(count.low_u64())
    }

    async fn blog_at(&self, index: u64) -> Result<BlogEntry, LedgerError> {
        let data = self.read(ContractCall::Blogs { index }).await?;
        Ok(BlogEntry::decode(&data)?)
    }

    async fn post_blog(&self, entry: &BlogEntry) -> Result<Receipt, LedgerError> {
        self.submit(entry.to_call()).await
    }
}
