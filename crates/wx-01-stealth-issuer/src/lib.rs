//! # WX-01 Stealth Issuer Client
//!
//! Client side of the stealth identity issuance service.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Exchange a participant's real identity for a one-time alias (the stealth
//! address) and learn whether that identity was already mapped:
//!
//! - `POST /create-writer` with `{ "address": <real identity> }`
//! - response `{ "stealthAddress": <alias>, "present"?: "already" }`
//!
//! The response is validated at this boundary; anything missing the alias is
//! rejected as malformed instead of being passed on.
//!
//! ## Module Structure
//!
//! ```text
//! wx-01-stealth-issuer/
//! ├── domain/          # Wire schema, validation, errors
//! ├── ports/           # StealthIssuer trait + in-memory issuer
//! ├── adapters/        # reqwest-backed HTTP issuer
//! └── config.rs        # IssuerConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::HttpStealthIssuer;
pub use config::IssuerConfig;
pub use domain::{
    CreateWriterRequest, CreateWriterResponse, IssuerError, CREATE_WRITER_PATH, PRESENT_MARKER,
};
pub use ports::{MockStealthIssuer, StealthIssuer};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
