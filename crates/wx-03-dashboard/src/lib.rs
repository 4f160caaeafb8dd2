//! # WX-03 Dashboard
//!
//! Builds the writer dashboard from the ledger's published content.
//!
//! **Subsystem ID:** 03
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Parse the navigation handoff (`/blog-page?stealth=<address>`) that the
//!   registration flow produces.
//! - Fetch the two parallel sequences returned by `getBlogs()` on every load
//!   and rebuild the ordered, index-aligned record list.
//!
//! Sequences of unequal length are rejected; the list is never truncated or
//! padded to make them fit.
//!
//! ## Module Structure
//!
//! ```text
//! wx-03-dashboard/
//! ├── domain/          # Handoff, view, errors
//! ├── algorithms/      # BlogListAssembler
//! ├── ports/           # DashboardApi (inbound) + RecordSource (outbound)
//! ├── application/     # DashboardService
//! └── config.rs        # DashboardConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use algorithms::{assemble, assemble_sequences};
pub use application::DashboardService;
pub use config::DashboardConfig;
pub use domain::{DashboardError, DashboardHandoff, DashboardView, STEALTH_PARAM};
pub use ports::{DashboardApi, MockRecordSource, RecordSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
