//! # Domain Module
//!
//! Wire schema and errors for stealth issuance.

pub mod errors;
pub mod value_objects;

pub use errors::*;
pub use value_objects::*;
