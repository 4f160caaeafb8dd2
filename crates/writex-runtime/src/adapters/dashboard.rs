//! # Dashboard Port Adapter
//!
//! Implements wx-03's `RecordSource` over the ledger client.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::RecordSequences;
use wx_02_ledger_client::LedgerClient;
use wx_03_dashboard::{DashboardError, RecordSource};

/// Reads `getBlogs()` through the ledger client.
pub struct LedgerRecordSource {
    ledger: Arc<dyn LedgerClient>,
}

impl LedgerRecordSource {
    /// Wrap a ledger client.
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl RecordSource for LedgerRecordSource {
    async fn fetch_records(&self) -> Result<RecordSequences, DashboardError> {
        self.ledger
            .get_records()
            .await
            .map_err(|e| DashboardError::Source {
                kind: e.kind(),
                message: e.to_string(),
            })
    }
}
