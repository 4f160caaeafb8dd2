//! HTTP Issuer Adapter
//!
//! Implements `StealthIssuer` by calling `POST /create-writer` with reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared_types::{RealIdentity, StealthIdentity};
use tracing::{debug, warn};

use crate::config::IssuerConfig;
use crate::domain::{CreateWriterRequest, CreateWriterResponse, IssuerError, CREATE_WRITER_PATH};
use crate::ports::StealthIssuer;

/// reqwest-backed stealth issuer.
pub struct HttpStealthIssuer {
    client: Client,
    endpoint: String,
}

impl HttpStealthIssuer {
    /// Create an issuer client from configuration.
    pub fn new(config: &IssuerConfig) -> Result<Self, IssuerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| IssuerError::BackendUnreachable(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                CREATE_WRITER_PATH
            ),
        })
    }

    /// Full URL of the issuance endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StealthIssuer for HttpStealthIssuer {
    async fn issue(&self, identity: &RealIdentity) -> Result<StealthIdentity, IssuerError> {
        debug!("[wx-01] Requesting stealth identity from {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&CreateWriterRequest::for_identity(identity))
            .send()
            .await
            .map_err(|e| {
                warn!("[wx-01] Issuance request failed: {}", e);
                IssuerError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("[wx-01] Issuance service returned HTTP {}", status);
            return Err(IssuerError::BackendUnreachable(format!(
                "issuance service returned HTTP {status}"
            )));
        }

        let body = response.bytes().await.map_err(IssuerError::from)?;
        let identity = CreateWriterResponse::parse(&body)?;

        debug!(
            "[wx-01] Issued {} (already registered: {})",
            identity.address, identity.already_registered
        );
        Ok(identity)
    }
}
