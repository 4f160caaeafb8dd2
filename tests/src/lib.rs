//! # WriteX Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── support/          # Stub issuance service and JSON-RPC node (axum)
//! └── integration/      # Cross-subsystem flows
//!     ├── registration_flow.rs   # coordinator + bridges over in-memory doubles
//!     ├── issuer_http.rs         # HttpStealthIssuer against the stub service
//!     └── ledger_rpc.rs          # JSON-RPC wallet + ledger against the stub node
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p wx-tests
//!
//! # By category
//! cargo test -p wx-tests integration::ledger_rpc::
//!
//! # Benchmarks
//! cargo bench -p wx-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
pub mod support;
