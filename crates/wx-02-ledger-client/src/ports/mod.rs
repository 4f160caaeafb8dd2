//! # Ports Module
//!
//! Hexagonal architecture ports for the ledger client.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
