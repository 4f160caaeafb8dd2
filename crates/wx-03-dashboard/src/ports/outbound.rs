//! # Outbound Ports

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::RecordSequences;

use crate::domain::DashboardError;

/// Source of the raw `getBlogs()` sequences - outbound port.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Read both sequences from the ledger.
    async fn fetch_records(&self) -> Result<RecordSequences, DashboardError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Record source returning fixed sequences.
#[derive(Default)]
pub struct MockRecordSource {
    sequences: Mutex<RecordSequences>,
    failure: Option<DashboardError>,
    fetches: AtomicUsize,
}

impl MockRecordSource {
    /// Source returning these sequences.
    pub fn new(titles: Vec<String>, pointers: Vec<String>) -> Self {
        Self {
            sequences: Mutex::new(RecordSequences { titles, pointers }),
            ..Self::default()
        }
    }

    /// Source that always fails.
    pub fn failing(error: DashboardError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Replace the sequences returned by later fetches.
    pub fn set(&self, titles: Vec<String>, pointers: Vec<String>) {
        *self.sequences.lock() = RecordSequences { titles, pointers };
    }

    /// Number of fetches served.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for MockRecordSource {
    async fn fetch_records(&self) -> Result<RecordSequences, DashboardError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        Ok(self.sequences.lock().clone())
    }
}
