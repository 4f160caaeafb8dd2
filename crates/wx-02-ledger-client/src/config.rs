//! # Ledger Configuration
//!
//! Endpoint, contract and timing settings for the ledger client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Ledger client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint of the node / wallet bridge.
    pub rpc_url: String,

    /// Address of the writer registry contract. Required for every call.
    pub contract_address: Option<Address>,

    /// Per-request timeout in seconds. A timed out read is a `ReadError`.
    pub request_timeout_secs: u64,

    /// How long to wait for a submitted transaction to be mined.
    pub receipt_timeout_secs: u64,

    /// Interval between `eth_getTransactionReceipt` polls.
    pub receipt_poll_interval_ms: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            contract_address: None,
            request_timeout_secs: 10,
            receipt_timeout_secs: 120,
            receipt_poll_interval_ms: 1000,
        }
    }
}

impl LedgerConfig {
    /// Create a config for testing (fast polling, short deadlines).
    pub fn for_testing() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            contract_address: Some(Address([0x42; 20])),
            request_timeout_secs: 2,
            receipt_timeout_secs: 2,
            receipt_poll_interval_ms: 20,
        }
    }

    /// Point the config at a different endpoint.
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Receipt wait deadline.
    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_secs(self.receipt_timeout_secs)
    }

    /// Receipt poll interval.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }
}
