//! # WX-04 Registration Coordinator
//!
//! Registers a participant as a writer under a stealth identity.
//!
//! **Subsystem ID:** 04
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Handshake
//!
//! 1. Read the real identity from the wallet.
//! 2. Exchange it for a stealth identity at the issuer.
//! 3. If the issuer reports the identity as present, stop: already registered.
//! 4. Otherwise register the stealth identity on the ledger and await the
//!    receipt.
//! 5. Hand the stealth identity to the dashboard, exactly once.
//!
//! ## Safety Properties
//!
//! | Property | Mechanism |
//! |----------|-----------|
//! | At most one ledger write per session | `running` flag + pure transition table |
//! | No write before the presence check | `Submitting` is only reachable via `Branch` from `StealthIssued` |
//! | Single handoff | `handed_off` latch |
//! | No lock across await | State mutex held only while applying a transition |
//!
//! ## Module Structure
//!
//! ```text
//! wx-04-registration/
//! ├── domain/          # RegistrationState, RegistrationEvent, transition()
//! ├── ports/           # RegistrationApi + IdentityProvider, StealthIssuance,
//! │                    # WriterRegistry, HandoffSink (with mocks)
//! └── application/     # RegistrationCoordinator
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::RegistrationCoordinator;
pub use domain::{
    transition, RegistrationError, RegistrationEvent, RegistrationState, Stage, Transition,
};
pub use ports::{
    HandoffSink, IdentityProvider, MockHandoffSink, MockIdentityProvider, MockIssuance,
    MockRegistry, RegistrationApi, StealthIssuance, WriterRegistry,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
