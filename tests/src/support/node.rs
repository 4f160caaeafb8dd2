//! Stub JSON-RPC node hosting the writer registry.
//!
//! Understands the registry's calldata, keeps writers and records in
//! memory, and mines every accepted transaction immediately (after an
//! optional number of pending receipt polls).

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use parking_lot::Mutex;
use primitive_types::U256;
use serde_json::{json, Value};
use shared_types::Address;
use wx_02_ledger_client::abi::{self, Decoder, Token, ERROR_STRING_SELECTOR, WORD};
use wx_02_ledger_client::adapters::rpc::{
    decode_hex_bytes, encode_hex_bytes, EXECUTION_REVERTED_CODE, METHOD_NOT_FOUND_CODE,
    USER_REJECTED_CODE,
};
use wx_02_ledger_client::{
    BlogEntry, ContractCall, JsonRpcErrorObject, JsonRpcRequest, JsonRpcResponse,
    TransactionRequest,
};

/// Revert reason of a duplicate `newWriter`.
pub const DUPLICATE_WRITER: &str = "Writer already exists";

#[derive(Default)]
struct NodeState {
    accounts: Mutex<Vec<Address>>,
    writers: Mutex<HashMap<String, Address>>,
    entries: Mutex<Vec<BlogEntry>>,
    sequences: Mutex<Option<(Vec<String>, Vec<String>)>>,
    receipts: Mutex<HashMap<String, Value>>,
    methods: Mutex<Vec<String>>,
    pending_polls: AtomicUsize,
    reject_signing: AtomicBool,
    fail_on_mine: AtomicBool,
    legacy_accounts: AtomicBool,
    locked: AtomicBool,
}

/// A running stub node.
pub struct StubNode {
    addr: SocketAddr,
    state: Arc<NodeState>,
}

impl StubNode {
    /// Start a node whose wallet exposes `account`.
    pub async fn start(account: Address) -> Self {
        let state = Arc::new(NodeState::default());
        state.accounts.lock().push(account);
        let app = Router::new().route("/", post(rpc)).with_state(state.clone());
        let addr = super::spawn_server(app).await;
        Self { addr, state }
    }

    /// Base URL of the node.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Expose no accounts at all.
    pub fn clear_accounts(&self) {
        self.state.accounts.lock().clear();
    }

    /// Answer `eth_requestAccounts` with "method not found".
    pub fn legacy_accounts(&self) {
        self.state.legacy_accounts.store(true, Ordering::SeqCst);
    }

    /// Refuse `eth_requestAccounts` with a node-side error.
    pub fn lock_accounts(&self) {
        self.state.locked.store(true, Ordering::SeqCst);
    }

    /// Decline every `eth_sendTransaction`.
    pub fn reject_signing(&self) {
        self.state.reject_signing.store(true, Ordering::SeqCst);
    }

    /// Mine transactions with status `0x0`.
    pub fn fail_on_mine(&self) {
        self.state.fail_on_mine.store(true, Ordering::SeqCst);
    }

    /// Answer `null` to this many receipt polls first.
    pub fn pending_polls(&self, polls: usize) {
        self.state.pending_polls.store(polls, Ordering::SeqCst);
    }

    /// Register a writer as if from an earlier session.
    pub fn seed_writer(&self, key: &str, owner: Address) {
        self.state.writers.lock().insert(key.to_string(), owner);
    }

    /// Make `getBlogs()` return these sequences verbatim.
    pub fn seed_sequences(&self, titles: Vec<String>, pointers: Vec<String>) {
        *self.state.sequences.lock() = Some((titles, pointers));
    }

    /// Owner registered under `key`.
    pub fn writer(&self, key: &str) -> Option<Address> {
        self.state.writers.lock().get(key).copied()
    }

    /// Methods called so far, in order.
    pub fn methods(&self) -> Vec<String> {
        self.state.methods.lock().clone()
    }

    /// Number of calls to `method`.
    pub fn count(&self, method: &str) -> usize {
        self.methods().iter().filter(|m| *m == method).count()
    }
}

async fn rpc(
    State(state): State<Arc<NodeState>>,
    Json(request): Json<JsonRpcRequest<Value>>,
) -> Json<JsonRpcResponse> {
    state.methods.lock().push(request.method.clone());
    let id = json!(request.id);
    let response = match dispatch(&state, &request.method, &request.params) {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(error) => JsonRpcResponse::failure(id, error),
    };
    Json(response)
}

fn dispatch(state: &NodeState, method: &str, params: &Value) -> Result<Value, JsonRpcErrorObject> {
    match method {
        "eth_requestAccounts" if state.legacy_accounts.load(Ordering::SeqCst) => {
            Err(error(METHOD_NOT_FOUND_CODE, "the method eth_requestAccounts does not exist"))
        }
        "eth_requestAccounts" if state.locked.load(Ordering::SeqCst) => {
            Err(error(-32000, "wallet is locked"))
        }
        "eth_requestAccounts" | "eth_accounts" => Ok(json!(*state.accounts.lock())),
        "eth_call" => {
            let data = calldata(&params[0])?;
            call(state, &data)
        }
        "eth_sendTransaction" => send_transaction(state, &params[0]),
        "eth_getTransactionReceipt" => {
            let hash = params[0].as_str().unwrap_or_default();
            let pending = state.pending_polls.load(Ordering::SeqCst);
            if pending > 0 {
                state.pending_polls.store(pending - 1, Ordering::SeqCst);
                return Ok(Value::Null);
            }
            Ok(state.receipts.lock().get(hash).cloned().unwrap_or(Value::Null))
        }
        other => Err(error(
            METHOD_NOT_FOUND_CODE,
            &format!("the method {other} does not exist"),
        )),
    }
}

fn error(code: i64, message: &str) -> JsonRpcErrorObject {
    JsonRpcErrorObject {
        code,
        message: message.to_string(),
        data: None,
    }
}

fn revert(reason: &str) -> JsonRpcErrorObject {
    let mut payload = ERROR_STRING_SELECTOR.to_vec();
    payload.extend(abi::encode(&[Token::String(reason.to_string())]));
    JsonRpcErrorObject {
        code: EXECUTION_REVERTED_CODE,
        message: format!("execution reverted: {reason}"),
        data: Some(json!(encode_hex_bytes(&payload))),
    }
}

fn calldata(tx: &Value) -> Result<Vec<u8>, JsonRpcErrorObject> {
    let raw = tx["data"].as_str().unwrap_or("0x");
    decode_hex_bytes(raw).map_err(|e| error(-32602, &e))
}

fn selector_of(signature: &str) -> [u8; 4] {
    abi::selector(signature)
}

fn string_arg(args: &[u8], index: usize) -> Result<String, JsonRpcErrorObject> {
    Decoder::new(args)
        .string(0, index * WORD)
        .map_err(|e| error(-32602, &e.to_string()))
}

/// Execute a read or a write simulation against the current state.
fn call(state: &NodeState, data: &[u8]) -> Result<Value, JsonRpcErrorObject> {
    if data.len() < 4 {
        return Err(revert("no selector"));
    }
    let (selector, args) = data.split_at(4);
    let empty = String::new;

    let output = if selector == selector_of(ContractCall::GetBlogs.signature()) {
        let (titles, pointers) = match state.sequences.lock().clone() {
            Some(sequences) => sequences,
            None => {
                let entries = state.entries.lock();
                (
                    entries.iter().map(|e| e.title.clone()).collect(),
                    entries.iter().map(|e| e.content_pointer.clone()).collect(),
                )
            }
        };
        abi::encode(&[Token::StringArray(titles), Token::StringArray(pointers)])
    } else if selector == selector_of(ContractCall::BlogCount.signature()) {
        abi::encode(&[Token::Uint(U256::from(state.entries.lock().len()))])
    } else if selector == selector_of(ContractCall::Blogs { index: 0 }.signature()) {
        let index = Decoder::new(args)
            .uint(0)
            .map_err(|e| error(-32602, &e.to_string()))?;
        let entries = state.entries.lock();
        let entry = usize::try_from(index.low_u64())
            .ok()
            .and_then(|i| entries.get(i))
            .ok_or_else(|| revert("index out of range"))?;
        entry.encode()
    } else if selector == selector_of(ContractCall::Addresses { key: empty() }.signature()) {
        let key = string_arg(args, 0)?;
        let owner = state.writers.lock().get(&key).copied().unwrap_or_default();
        abi::encode(&[Token::Address(owner)])
    } else if selector == selector_of(ContractCall::NewWriter { key: empty() }.signature()) {
        let key = string_arg(args, 0)?;
        if state.writers.lock().contains_key(&key) {
            return Err(revert(DUPLICATE_WRITER));
        }
        Vec::new()
    } else if selector
        == selector_of(
            ContractCall::PostBlog {
                title: empty(),
                content_pointer: empty(),
                key: empty(),
                proof: empty(),
            }
            .signature(),
        )
    {
        Vec::new()
    } else {
        return Err(revert("unknown function"));
    };
    Ok(json!(encode_hex_bytes(&output)))
}

fn send_transaction(state: &NodeState, tx: &Value) -> Result<Value, JsonRpcErrorObject> {
    if state.reject_signing.load(Ordering::SeqCst) {
        return Err(error(USER_REJECTED_CODE, "User denied transaction signature"));
    }
    let request: TransactionRequest =
        serde_json::from_value(tx.clone()).map_err(|e| error(-32602, &e.to_string()))?;

    let success = !state.fail_on_mine.load(Ordering::SeqCst) && call(state, &request.data).is_ok();
    if success {
        apply(state, &request)?;
    }

    let block = state.receipts.lock().len() + 1;
    let mut preimage = request.data.clone();
    preimage.extend_from_slice(&block.to_be_bytes());
    let hash = encode_hex_bytes(&abi::keccak256(&preimage));

    state.receipts.lock().insert(
        hash.clone(),
        json!({
            "transactionHash": hash,
            "blockNumber": format!("{block:#x}"),
            "gasUsed": "0x5208",
            "status": if success { "0x1" } else { "0x0" },
        }),
    );
    Ok(json!(hash))
}

fn apply(state: &NodeState, request: &TransactionRequest) -> Result<(), JsonRpcErrorObject> {
    let (selector, args) = request.data.split_at(4);
    if selector == selector_of(ContractCall::NewWriter { key: String::new() }.signature()) {
        let key = string_arg(args, 0)?;
        state.writers.lock().insert(key, request.from);
    } else if selector
        == selector_of(
            ContractCall::PostBlog {
                title: String::new(),
                content_pointer: String::new(),
                key: String::new(),
                proof: String::new(),
            }
            .signature(),
        )
    {
        state.entries.lock().push(BlogEntry {
            title: string_arg(args, 0)?,
            content_pointer: string_arg(args, 1)?,
            key: string_arg(args, 2)?,
            proof: string_arg(args, 3)?,
        });
    }
    Ok(())
}
