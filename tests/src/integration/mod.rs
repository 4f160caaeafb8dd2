//! # Integration Flows
//!
//! Cross-subsystem tests. In-memory doubles cover the handshake logic;
//! the stub services cover the real HTTP and JSON-RPC adapters.

pub mod ledger_rpc;
pub mod registration_flow;
