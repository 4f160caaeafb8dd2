//! # Ports Module
//!
//! Hexagonal architecture ports for the dashboard.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
