//! # Ports Module
//!
//! Hexagonal architecture ports for the registration coordinator.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
