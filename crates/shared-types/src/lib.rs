//! # Shared Types Crate
//!
//! This crate contains the data model exchanged between the WriteX
//! subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identities, content records and receipts are
//!   defined once here and passed by value between subsystems.
//! - **Validated Construction**: identifiers cannot be empty; hex-encoded
//!   ledger values are parsed into fixed-size arrays at the boundary.
//! - **One Failure Taxonomy**: every subsystem error maps onto a
//!   [`FailureKind`] so the presentation layer sees a single vocabulary.

pub mod entities;
pub mod errors;
pub mod status;

pub use entities::*;
pub use errors::*;
pub use status::*;
