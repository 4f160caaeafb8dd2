//! JSON-RPC 2.0 transport over HTTP.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::domain::abi;

/// EIP-1193: the user rejected the request.
pub const USER_REJECTED_CODE: i64 = 4001;

/// JSON-RPC: the method does not exist.
pub const METHOD_NOT_FOUND_CODE: i64 = -32601;

/// Geth/Hardhat: execution reverted.
pub const EXECUTION_REVERTED_CODE: i64 = 3;

/// Errors from a single JSON-RPC exchange.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RpcError {
    /// The endpoint could not be reached.
    #[error("RPC transport error: {0}")]
    Transport(String),

    /// The request did not complete in time.
    #[error("RPC request timed out: {0}")]
    Timeout(String),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
        /// Optional error data (revert payload for reverts)
        data: Option<Value>,
    },

    /// The response could not be decoded.
    #[error("Failed to parse RPC response: {0}")]
    Parse(String),
}

impl RpcError {
    /// Whether the node reported a contract revert.
    pub fn is_revert(&self) -> bool {
        match self {
            Self::Rpc { code, message, .. } => {
                *code == EXECUTION_REVERTED_CODE || message.contains("revert")
            }
            _ => false,
        }
    }

    /// Whether the call never reached a node.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    /// Revert reason: the decoded `Error(string)` payload if present,
    /// otherwise the text after `execution reverted:` in the message.
    pub fn revert_reason(&self) -> Option<String> {
        let Self::Rpc { message, data, .. } = self else {
            return None;
        };
        let from_data = data
            .as_ref()
            .and_then(revert_payload)
            .and_then(|bytes| abi::decode_revert_reason(&bytes));
        from_data.or_else(|| {
            message
                .split_once("reverted:")
                .map(|(_, reason)| reason.trim().to_string())
                .filter(|reason| !reason.is_empty())
        })
    }
}

/// Revert bytes appear either as a hex string or nested as `{"data": "0x.."}`.
fn revert_payload(data: &Value) -> Option<Vec<u8>> {
    match data {
        Value::String(s) => decode_hex_bytes(s).ok(),
        Value::Object(map) => map.get("data").and_then(revert_payload),
        _ => None,
    }
}

/// Decode `0x`-prefixed hex data.
pub fn decode_hex_bytes(s: &str) -> Result<Vec<u8>, String> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s)).map_err(|e| format!("invalid hex data: {e}"))
}

/// Encode bytes as `0x`-prefixed hex.
pub fn encode_hex_bytes(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

/// Parse a `0x`-prefixed hex quantity.
pub fn parse_quantity(s: &str) -> Result<u64, String> {
    u64::from_str_radix(s.strip_prefix("0x").unwrap_or(s), 16)
        .map_err(|e| format!("invalid quantity {s}: {e}"))
}

/// JSON-RPC request structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcRequest<T> {
    /// Protocol version, always "2.0"
    pub jsonrpc: String,
    /// Method name
    pub method: String,
    /// Positional parameters
    pub params: T,
    /// Request id
    pub id: u64,
}

impl<T> JsonRpcRequest<T> {
    /// Build a request.
    pub fn new(method: impl Into<String>, params: T, id: u64) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params,
            id,
        }
    }
}

/// JSON-RPC response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version
    pub jsonrpc: String,
    /// Echoed request id
    pub id: Value,
    /// Result on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorObject>,
}

impl JsonRpcResponse {
    /// Successful response.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Error response.
    pub fn failure(id: Value, error: JsonRpcErrorObject) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    /// Error code
    pub code: i64,
    /// Error message
    pub message: String,
    /// Optional data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// JSON-RPC client shared by the wallet and ledger adapters.
pub struct JsonRpcClient {
    client: Client,
    url: String,
    request_id: AtomicU64,
}

impl JsonRpcClient {
    /// Create a client for `url` with a per-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RpcError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(3)))
            .build()
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            request_id: AtomicU64::new(1),
        })
    }

    /// Endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Call a JSON-RPC method.
    ///
    /// A `null` result deserializes into `R`, so `Option<T>` results work.
    pub async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, RpcError> {
        let request = JsonRpcRequest::new(method, params, self.next_id());
        debug!("[wx-02] -> {} (id {})", method, request.id);

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        let rpc_response: JsonRpcResponse = match serde_json::from_slice(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(RpcError::Transport(format!("HTTP {status} from {}", self.url)));
            }
            Err(e) => return Err(RpcError::Parse(e.to_string())),
        };

        if let Some(error) = rpc_response.error {
            debug!("[wx-02] <- {} error {}: {}", method, error.code, error.message);
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message,
                data: error.data,
            });
        }

        serde_json::from_value(rpc_response.result.unwrap_or(Value::Null))
            .map_err(|e| RpcError::Parse(format!("{method}: {e}")))
    }

    fn transport_error(&self, e: reqwest::Error) -> RpcError {
        if e.is_timeout() {
            RpcError::Timeout(format!("{} did not answer in time", self.url))
        } else if e.is_connect() {
            RpcError::Transport(format!("Cannot connect to {}", self.url))
        } else {
            RpcError::Transport(e.to_string())
        }
    }
}
