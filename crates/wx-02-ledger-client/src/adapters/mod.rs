//! # Adapters
//!
//! JSON-RPC implementations of the ledger client ports.

pub mod ledger;
pub mod rpc;
pub mod wallet;

pub use ledger::JsonRpcLedgerClient;
pub use rpc::{JsonRpcClient, JsonRpcErrorObject, JsonRpcRequest, JsonRpcResponse, RpcError};
pub use wallet::JsonRpcWallet;
