//! # WriteX Telemetry
//!
//! Logging setup shared by the WriteX binaries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use writex_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `WX_SERVICE_NAME` | `writex` | Service name attached to log lines |
//! | `WX_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `WX_JSON_LOGS` | `false` (`true` in containers) | JSON instead of pretty output |
//! | `WX_CONSOLE_OUTPUT` | `true` | Emit logs to stderr at all |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log filter directive could not be parsed.
    #[error("Invalid log filter `{directive}`: {reason}")]
    InvalidFilter {
        /// Directive as configured
        directive: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("Failed to initialize logging: {0}")]
    SubscriberInit(String),
}
