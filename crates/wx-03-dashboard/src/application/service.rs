//! # Dashboard Service
//!
//! Loads the record list for a handed-off stealth identity.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::algorithms::assemble_sequences;
use crate::config::DashboardConfig;
use crate::domain::{DashboardError, DashboardHandoff, DashboardView};
use crate::ports::{DashboardApi, RecordSource};

/// Dashboard service.
pub struct DashboardService<S: RecordSource> {
    config: DashboardConfig,
    source: S,
}

impl<S: RecordSource> DashboardService<S> {
    /// Create a new dashboard service.
    pub fn new(config: DashboardConfig, source: S) -> Self {
        Self { config, source }
    }

    /// Route for a handoff under the configured dashboard path.
    pub fn route_for(&self, handoff: &DashboardHandoff) -> String {
        handoff.to_route(&self.config.route_path)
    }

    /// Absolute link for a handoff.
    pub fn link_for(&self, handoff: &DashboardHandoff) -> String {
        format!(
            "{}{}",
            self.config.app_url.trim_end_matches('/'),
            self.route_for(handoff)
        )
    }

    /// Parse a route and load it.
    pub async fn load_route(&self, route: &str) -> Result<DashboardView, DashboardError> {
        let handoff = DashboardHandoff::parse(route)?;
        self.load(&handoff).await
    }

    /// Underlying record source.
    pub fn source(&self) -> &S {
        &self.source
    }
}

#[async_trait]
impl<S: RecordSource> DashboardApi for DashboardService<S> {
    async fn load(&self, handoff: &DashboardHandoff) -> Result<DashboardView, DashboardError> {
        info!("[wx-03] Loading dashboard for {}", handoff.stealth_address);

        let sequences = self.source.fetch_records().await.map_err(|e| {
            warn!("[wx-03] Record fetch failed: {}", e);
            e
        })?;

        let records = assemble_sequences(sequences).map_err(|e| {
            warn!("[wx-03] {}", e);
            e
        })?;

        info!("[wx-03] Dashboard ready: {} records", records.len());
        Ok(DashboardView::new(handoff.stealth_address.clone(), records))
    }
}
