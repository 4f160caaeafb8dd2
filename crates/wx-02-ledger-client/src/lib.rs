//! # WX-02 Ledger Client
//!
//! Calls into the on-chain writer registry.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Bind a stealth identity to the ledger (`newWriter(key)`) and await the
//!   mined receipt.
//! - Read the published content list (`getBlogs()`) as two parallel
//!   sequences, plus the per-key and per-index accessors.
//!
//! ## Safety Properties
//!
//! | Property | Mechanism |
//! |----------|-----------|
//! | Ledger is the authority on duplicates | `eth_call` pre-flight surfaces reverts with their reason |
//! | No fire-and-forget writes | Receipt polling until confirmation or deadline |
//! | No implicit retries | Every call is one attempt whose outcome is returned |
//! | No panics on hostile payloads | Bounds-checked ABI decoder |
//!
//! ## Module Structure
//!
//! ```text
//! wx-02-ledger-client/
//! ├── domain/          # ABI codec, contract surface, transaction types, errors
//! ├── ports/           # LedgerClient (inbound) + WalletProvider (outbound)
//! ├── adapters/        # JSON-RPC transport, wallet and ledger adapters
//! └── config.rs        # LedgerConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{
    JsonRpcClient, JsonRpcErrorObject, JsonRpcLedgerClient, JsonRpcRequest, JsonRpcResponse,
    JsonRpcWallet, RpcError,
};
pub use config::LedgerConfig;
pub use domain::{
    abi, AbiError, BlogEntry, ContractCall, LedgerError, LedgerEvent, TransactionRequest,
    WalletError,
};
pub use ports::{LedgerClient, MockLedger, MockWallet, WalletProvider};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
