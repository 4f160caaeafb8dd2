//! # Domain Module
//!
//! Registration state machine and errors.

pub mod errors;
pub mod state;

pub use errors::*;
pub use state::*;
