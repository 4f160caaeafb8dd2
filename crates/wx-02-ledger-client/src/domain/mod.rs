//! # Domain Module
//!
//! Core types for talking to the writer registry contract.

pub mod abi;
pub mod contract;
pub mod entities;
pub mod errors;

pub use contract::*;
pub use entities::*;
pub use errors::*;
