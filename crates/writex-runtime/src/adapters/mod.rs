//! # Port Bridges
//!
//! Implements the outbound ports of the coordinator and the dashboard on
//! top of the wallet, issuer and ledger clients.
//!
//! ```text
//! wx-04 IdentityProvider  ──▶ WalletIdentity    ──▶ wx-02 WalletProvider
//! wx-04 StealthIssuance   ──▶ IssuerBridge      ──▶ wx-01 StealthIssuer
//! wx-04 WriterRegistry    ──▶ LedgerRegistry    ──▶ wx-02 LedgerClient
//! wx-04 HandoffSink       ──▶ HandoffSlot       ──▶ wx-03 DashboardHandoff
//! wx-03 RecordSource      ──▶ LedgerRecordSource ──▶ wx-02 LedgerClient
//! ```

pub mod dashboard;
pub mod registration;

pub use dashboard::LedgerRecordSource;
pub use registration::{HandoffSlot, IssuerBridge, LedgerRegistry, WalletIdentity};
