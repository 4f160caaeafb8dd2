//! # Subsystem Container
//!
//! Holds the configured subsystems and the bridges between them.
//!
//! - Configuration is resolved before anything is constructed
//! - The coordinator and the dashboard share one ledger client
//! - The handoff slot is the only path from registration to the dashboard

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, WritexConfig};
pub use subsystems::{RuntimeError, WritexRuntime};
