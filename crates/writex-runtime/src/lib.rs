//! # WriteX Runtime Library
//!
//! This library exposes the internal modules of the `writex` binary for
//! testing. The main entry point is the `main.rs` binary.
//!
//! ## Module Structure
//!
//! - `container/` - Configuration and the subsystem container
//! - `adapters/` - Port bridges connecting the subsystems
//! - `cli` - Command line surface

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod cli;
pub mod container;

pub use cli::{Cli, Command};
pub use container::{ConfigError, RuntimeError, WritexConfig, WritexRuntime};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
