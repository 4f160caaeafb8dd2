//! # Runtime Configuration
//!
//! Layered configuration for the `writex` binary:
//!
//! 1. Built-in defaults of each subsystem config
//! 2. Optional TOML file (`--config` / `WX_CONFIG`)
//! 3. Environment overrides
//! 4. CLI flags (applied by `main.rs`)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared_types::Address;
use thiserror::Error;
use wx_01_stealth_issuer::IssuerConfig;
use wx_02_ledger_client::LedgerConfig;
use wx_03_dashboard::DashboardConfig;

/// Environment variable overriding the issuer base URL.
pub const ENV_BACKEND_API_URL: &str = "WX_BACKEND_API_URL";
/// Environment variable overriding the JSON-RPC endpoint.
pub const ENV_RPC_URL: &str = "WX_RPC_URL";
/// Environment variable carrying the writer registry contract address.
pub const ENV_CONTRACT_ADDRESS: &str = "WX_CONTRACT_ADDRESS";
/// Environment variable overriding the issuer request timeout.
pub const ENV_ISSUER_TIMEOUT_SECS: &str = "WX_ISSUER_TIMEOUT_SECS";
/// Environment variable overriding the receipt wait deadline.
pub const ENV_RECEIPT_TIMEOUT_SECS: &str = "WX_RECEIPT_TIMEOUT_SECS";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {error}")]
    Io {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O error
        error: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`WritexConfig`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override could not be parsed.
    #[error("Invalid value for {var}: {reason}")]
    InvalidEnv {
        /// Variable name
        var: &'static str,
        /// Parse failure
        reason: String,
    },

    /// No writer registry contract was configured.
    #[error("No contract address configured. Set WX_CONTRACT_ADDRESS or ledger.contract_address.")]
    MissingContractAddress,
}

/// Complete runtime configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WritexConfig {
    /// Stealth issuance service.
    pub issuer: IssuerConfig,
    /// JSON-RPC ledger and wallet.
    pub ledger: LedgerConfig,
    /// Dashboard routing.
    pub dashboard: DashboardConfig,
}

impl WritexConfig {
    /// Create a config for testing.
    pub fn for_testing() -> Self {
        Self {
            issuer: IssuerConfig::for_testing(),
            ledger: LedgerConfig::for_testing(),
            dashboard: DashboardConfig::for_testing(),
        }
    }

    /// Parse TOML text. Missing sections and fields keep their defaults.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Self::parse(&text)
    }

    /// Defaults, or the file at `path`, with process environment overrides.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `WX_*` overrides from `lookup`. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup(ENV_BACKEND_API_URL) {
            self.issuer.base_url = url;
        }
        if let Some(url) = lookup(ENV_RPC_URL) {
            self.ledger.rpc_url = url;
        }
        if let Some(raw) = lookup(ENV_CONTRACT_ADDRESS) {
            let address = raw.trim().parse::<Address>().map_err(|e| ConfigError::InvalidEnv {
                var: ENV_CONTRACT_ADDRESS,
                reason: e.to_string(),
            })?;
            self.ledger.contract_address = Some(address);
        }
        if let Some(raw) = lookup(ENV_ISSUER_TIMEOUT_SECS) {
            self.issuer.timeout_secs = parse_secs(ENV_ISSUER_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_RECEIPT_TIMEOUT_SECS) {
            self.ledger.receipt_timeout_secs = parse_secs(ENV_RECEIPT_TIMEOUT_SECS, &raw)?;
        }
        Ok(())
    }

    /// Check the configuration is usable and return the contract address.
    pub fn validate(&self) -> Result<Address, ConfigError> {
        self.ledger
            .contract_address
            .ok_or(ConfigError::MissingContractAddress)
    }
}

fn parse_secs(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidEnv {
            var,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(secs),
        Err(e) => Err(ConfigError::InvalidEnv {
            var,
            reason: e.to_string(),
        }),
    }
}
