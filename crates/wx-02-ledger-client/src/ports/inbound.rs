//! # Inbound Ports
//!
//! The API other subsystems use to read and write the writer registry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{Address, Receipt, RecordSequences, StealthIdentity, TxHash};

use crate::domain::{abi, BlogEntry, LedgerError};

/// Writer registry client - inbound port.
///
/// Every method is a single attempt; callers decide whether to retry.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Bind the stealth identity to the caller's real address
    /// (`newWriter(key)`) and wait for the mined receipt.
    ///
    /// A duplicate key is rejected by the ledger and surfaces as
    /// [`LedgerError::TransactionReverted`].
    async fn register(&self, identity: &StealthIdentity) -> Result<Receipt, LedgerError>;

    /// Read the published content list as two parallel sequences.
    async fn get_records(&self) -> Result<RecordSequences, LedgerError>;

    /// Real address bound to a stealth key; the zero address when unbound.
    async fn writer_address(&self, key: &str) -> Result<Address, LedgerError>;

    /// Number of stored records.
    async fn blog_count(&self) -> Result<u64, LedgerError>;

    /// Full record at `index`.
    async fn blog_at(&self, index: u64) -> Result<BlogEntry, LedgerError>;

    /// Publish a record and wait for the mined receipt.
    async fn post_blog(&self, entry: &BlogEntry) -> Result<Receipt, LedgerError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// In-memory writer registry.
///
/// Behaves like the contract: duplicate keys revert, unknown keys resolve to
/// the zero address, out-of-range indices fail the read.
pub struct MockLedger {
    owner: Address,
    writers: Mutex<HashMap<String, Address>>,
    entries: Mutex<Vec<BlogEntry>>,
    sequences: Mutex<Option<RecordSequences>>,
    failure: Mutex<Option<LedgerError>>,
    register_calls: AtomicUsize,
    tx_nonce: AtomicU64,
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new(Address([0x11; 20]))
    }
}

impl MockLedger {
    /// Create an empty ledger whose writes come from `owner`.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            writers: Mutex::new(HashMap::new()),
            entries: Mutex::new(Vec::new()),
            sequences: Mutex::new(None),
            failure: Mutex::new(None),
            register_calls: AtomicUsize::new(0),
            tx_nonce: AtomicU64::new(0),
        }
    }

    /// Pre-populate stored records.
    pub fn with_entries(self, entries: Vec<BlogEntry>) -> Self {
        *self.entries.lock() = entries;
        self
    }

    /// Return these raw sequences from `get_records`, even if their lengths
    /// disagree.
    pub fn with_sequences(self, sequences: RecordSequences) -> Self {
        *self.sequences.lock() = Some(sequences);
        self
    }

    /// Mark a key as already bound.
    pub fn with_writer(self, key: impl Into<String>) -> Self {
        self.writers.lock().insert(key.into(), self.owner);
        self
    }

    /// Fail every subsequent call with `error`.
    pub fn fail_with(&self, error: LedgerError) {
        *self.failure.lock() = Some(error);
    }

    /// Number of `register` calls received.
    pub fn register_call_count(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    /// Whether a key is bound.
    pub fn is_registered(&self, key: &str) -> bool {
        self.writers.lock().contains_key(key)
    }

    fn check_failure(&self) -> Result<(), LedgerError> {
        match self.failure.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn next_receipt(&self) -> Receipt {
        let nonce = self.tx_nonce.fetch_add(1, Ordering::SeqCst) + 1;
        Receipt {
            tx_hash: TxHash(abi::keccak256(&nonce.to_be_bytes())),
            block_number: Some(nonce),
            gas_used: Some(21_000),
        }
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn register(&self, identity: &StealthIdentity) -> Result<Receipt, LedgerError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let key = identity.address.as_str().to_string();
        let mut writers = self.writers.lock();
        if writers.contains_key(&key) {
            return Err(LedgerError::reverted("Writer already exists"));
        }
        writers.insert(key, self.owner);
        Ok(self.next_receipt())
    }

    async fn get_records(&self) -> Result<RecordSequences, LedgerError> {
        self.check_failure()?;

        if let Some(sequences) = self.sequences.lock().clone() {
            return Ok(sequences);
        }
        let entries = self.entries.lock();
        Ok(RecordSequences {
            titles: entries.iter().map(|e| e.title.clone()).collect(),
            pointers: entries.iter().map(|e| e.content_pointer.clone()).collect(),
        })
    }

    async fn writer_address(&self, key: &str) -> Result<Address, LedgerError> {
        self.check_failure()?;
        Ok(self.writers.lock().get(key).copied().unwrap_or_default())
    }

    async fn blog_count(&self) -> Result<u64, LedgerError> {
        self.check_failure()?;
        Ok(self.entries.lock().len() as u64)
    }

    async fn blog_at(&self, index: u64) -> Result<BlogEntry, LedgerError> {
        self.check_failure()?;
        usize::try_from(index)
            .ok()
            .and_then(|i| self.entries.lock().get(i).cloned())
            .ok_or_else(|| LedgerError::ReadError(format!("no record at index {index}")))
    }

    async fn post_blog(&self, entry: &BlogEntry) -> Result<Receipt, LedgerError> {
        self.check_failure()?;
        self.entries.lock().push(entry.clone());
        Ok(self.next_receipt())
    }
}
