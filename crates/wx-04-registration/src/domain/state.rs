//! # Registration State Machine
//!
//! ```text
//! Idle ──WalletConnected──► WalletConnected ──StealthIssued──► StealthIssued
//!   │                            │                               │ Branch
//!   └─WalletFailed─► Failed      └─IssuanceFailed─► Failed       ├─► AlreadyRegistered
//!                                                                └─► Submitting
//!                                  Submitting ──SubmissionConfirmed──► Registered
//!                                             └─SubmissionFailed─────► Failed
//! Failed (retryable) ──Retry──► Idle
//! ```
//!
//! Every (state, event) pair outside this table is ignored, so repeated
//! events after a branch or terminal state change nothing.

use std::fmt;

use shared_types::{FailureKind, RealIdentity, Receipt, StatusMessage, StealthIdentity};

/// The handshake step a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Reading the participant's identity from the wallet
    Wallet,
    /// Requesting the stealth identity
    Issuance,
    /// Submitting or confirming the ledger registration
    Submission,
}

/// Registration session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationState {
    /// Nothing has happened yet.
    Idle,
    /// The wallet reported the participant's identity.
    WalletConnected {
        /// Real identity for this session
        identity: RealIdentity,
    },
    /// The issuer returned a stealth identity.
    StealthIssued {
        /// Issued identity and presence flag
        identity: StealthIdentity,
    },
    /// The issuer reported an existing registration; nothing is submitted.
    AlreadyRegistered {
        /// Issued identity
        identity: StealthIdentity,
    },
    /// The ledger registration is in flight.
    Submitting {
        /// Identity being registered
        identity: StealthIdentity,
    },
    /// The ledger confirmed the registration.
    Registered {
        /// Registered identity
        identity: StealthIdentity,
        /// Mined receipt
        receipt: Receipt,
    },
    /// A step failed.
    Failed {
        /// What went wrong
        kind: FailureKind,
        /// Where it went wrong
        stage: Stage,
    },
}

impl RegistrationState {
    /// State name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::WalletConnected { .. } => "WalletConnected",
            Self::StealthIssued { .. } => "StealthIssued",
            Self::AlreadyRegistered { .. } => "AlreadyRegistered",
            Self::Submitting { .. } => "Submitting",
            Self::Registered { .. } => "Registered",
            Self::Failed { .. } => "Failed",
        }
    }

    /// Whether a fresh attempt may start from this state.
    ///
    /// A submission that reverted, or whose outcome was never observed, may
    /// already be on the ledger, so it is never retried.
    pub fn can_retry(&self) -> bool {
        match self {
            Self::Failed { kind, stage } => !(*stage == Stage::Submission
                && matches!(
                    kind,
                    FailureKind::TransactionReverted | FailureKind::ReadError
                )),
            _ => false,
        }
    }

    /// Whether no further event can change this session.
    pub fn is_terminal(&self) -> bool {
        match self {
            Self::AlreadyRegistered { .. } | Self::Registered { .. } => true,
            Self::Failed { .. } => !self.can_retry(),
            _ => false,
        }
    }

    /// Whether the handshake completed and the dashboard may open.
    pub fn is_complete(&self) -> bool {
        matches!(
            self,
            Self::AlreadyRegistered { .. } | Self::Registered { .. }
        )
    }

    /// The stealth identity, once issued.
    pub fn stealth_identity(&self) -> Option<&StealthIdentity> {
        match self {
            Self::StealthIssued { identity }
            | Self::AlreadyRegistered { identity }
            | Self::Submitting { identity }
            | Self::Registered { identity, .. } => Some(identity),
            _ => None,
        }
    }

    /// Failure classification, for `Failed`.
    pub fn failure(&self) -> Option<FailureKind> {
        match self {
            Self::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Participant-facing status line.
    pub fn status(&self) -> StatusMessage {
        match self {
            Self::Idle => StatusMessage::info("Connect your wallet to register as a writer."),
            Self::WalletConnected { .. } => StatusMessage::info("Wallet connected successfully!"),
            Self::StealthIssued { .. } => StatusMessage::info("Stealth address issued."),
            Self::AlreadyRegistered { .. } => {
                StatusMessage::success("Welcome back! You are already registered as a writer.")
            }
            Self::Submitting { .. } => StatusMessage::info("Registering you as a writer..."),
            Self::Registered { .. } => {
                StatusMessage::success("Successfully registered as a writer! Welcome aboard!")
            }
            Self::Failed { kind, .. } => StatusMessage::from_failure(*kind),
        }
    }
}

impl fmt::Display for RegistrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed { kind, stage } => write!(f, "Failed({kind:?} during {stage:?})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationEvent {
    /// The wallet returned an identity.
    WalletConnected(RealIdentity),
    /// The wallet could not provide an identity.
    WalletFailed(FailureKind),
    /// The issuer returned a stealth identity.
    StealthIssued(StealthIdentity),
    /// The issuer call failed.
    IssuanceFailed(FailureKind),
    /// Decide between skipping and submitting, from the presence flag.
    Branch,
    /// The ledger confirmed the registration.
    SubmissionConfirmed(Receipt),
    /// The ledger registration failed.
    SubmissionFailed(FailureKind),
    /// Start over after a retryable failure.
    Retry,
}

impl RegistrationEvent {
    /// Event name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::WalletConnected(_) => "WalletConnected",
            Self::WalletFailed(_) => "WalletFailed",
            Self::StealthIssued(_) => "StealthIssued",
            Self::IssuanceFailed(_) => "IssuanceFailed",
            Self::Branch => "Branch",
            Self::SubmissionConfirmed(_) => "SubmissionConfirmed",
            Self::SubmissionFailed(_) => "SubmissionFailed",
            Self::Retry => "Retry",
        }
    }
}

/// Result of applying an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Move to this state.
    Next(RegistrationState),
    /// The event does not apply; keep the current state.
    Ignore,
}

/// Compute the next state. Pure: no I/O, no clock, no randomness.
pub fn transition(state: &RegistrationState, event: &RegistrationEvent) -> Transition {
    use RegistrationEvent as E;
    use RegistrationState as S;

    let next = match (state, event) {
        (S::Idle, E::WalletConnected(identity)) => S::WalletConnected {
            identity: identity.clone(),
        },
        (S::Idle, E::WalletFailed(kind)) => S::Failed {
            kind: *kind,
            stage: Stage::Wallet,
        },
        (S::WalletConnected { .. }, E::StealthIssued(identity)) => S::StealthIssued {
            identity: identity.clone(),
        },
        (S::WalletConnected { .. }, E::IssuanceFailed(kind)) => S::Failed {
            kind: *kind,
            stage: Stage::Issuance,
        },
        (S::StealthIssued { identity }, E::Branch) => {
            if identity.already_registered {
                S::AlreadyRegistered {
                    identity: identity.clone(),
                }
            } else {
                S::Submitting {
                    identity: identity.clone(),
                }
            }
        }
        (S::Submitting { identity }, E::SubmissionConfirmed(receipt)) => S::Registered {
            identity: identity.clone(),
            receipt: receipt.clone(),
        },
        (S::Submitting { .. }, E::SubmissionFailed(kind)) => S::Failed {
            kind: *kind,
            stage: Stage::Submission,
        },
        (failed @ S::Failed { .. }, E::Retry) if failed.can_retry() => S::Idle,
        _ => return Transition::Ignore,
    };

    Transition::Next(next)
}
