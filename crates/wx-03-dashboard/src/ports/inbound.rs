//! # Inbound Ports

use async_trait::async_trait;

use crate::domain::{DashboardError, DashboardHandoff, DashboardView};

/// Dashboard API - inbound port.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Fetch the current record list and build the view for `handoff`.
    ///
    /// Nothing is cached; each call reads the ledger again.
    async fn load(&self, handoff: &DashboardHandoff) -> Result<DashboardView, DashboardError>;
}
