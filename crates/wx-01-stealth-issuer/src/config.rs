//! # Issuer Configuration
//!
//! Connection settings for the issuance service.

use serde::{Deserialize, Serialize};

/// Stealth issuer client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuerConfig {
    /// Base URL of the issuance service (without the route).
    pub base_url: String,

    /// Whole-request timeout in seconds. A timeout is reported as
    /// `BackendUnreachable`.
    pub timeout_secs: u64,

    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 3,
        }
    }
}

impl IssuerConfig {
    /// Create a config for testing (short timeouts).
    pub fn for_testing() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 2,
            connect_timeout_secs: 1,
        }
    }

    /// Point the config at a different base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
