//! # Registration Coordinator
//!
//! Drives the handshake: wallet identity, stealth issuance, presence branch,
//! ledger registration, dashboard handoff.
//!
//! State lives behind a `parking_lot::Mutex` that is only held while a
//! transition is applied, never across an `.await`. A `running` flag makes
//! overlapping `begin()` calls no-ops, so the ledger write runs at most once
//! per session. The ledger write runs on a spawned task, so a dropped
//! `begin()` future never strands the session in `Submitting`.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{FailureKind, Receipt, StatusMessage, StealthIdentity};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::{
    transition, RegistrationError, RegistrationEvent, RegistrationState, Transition,
};
use crate::ports::{HandoffSink, IdentityProvider, RegistrationApi, StealthIssuance, WriterRegistry};

struct Session {
    state: RegistrationState,
    running: bool,
    handed_off: bool,
}

/// Session state shared with the submission task.
struct Shared {
    session: Mutex<Session>,
    status_tx: watch::Sender<StatusMessage>,
    handoff: Arc<dyn HandoffSink>,
}

impl Shared {
    /// Apply an event and publish the resulting status.
    fn apply(&self, event: RegistrationEvent) -> RegistrationState {
        let state = {
            let mut session = self.session.lock();
            match transition(&session.state, &event) {
                Transition::Next(next) => {
                    info!("[wx-04] {} --{}--> {}", session.state, event.name(), next);
                    session.state = next;
                }
                Transition::Ignore => {
                    warn!("[wx-04] {} ignored in {}", event.name(), session.state);
                }
            }
            session.state.clone()
        };
        self.publish();
        state
    }

    fn publish(&self) {
        let status = self.session.lock().state.status();
        self.status_tx.send_replace(status);
    }

    /// Hand the identity to the dashboard, at most once per session.
    fn deliver(&self, identity: &StealthIdentity) {
        let first = {
            let mut session = self.session.lock();
            !std::mem::replace(&mut session.handed_off, true)
        };
        if first {
            info!("[wx-04] Handing off {} to dashboard", identity.address);
            self.handoff.hand_off(identity.clone());
        }
    }

    fn finish_submission(
        &self,
        identity: &StealthIdentity,
        outcome: Result<Receipt, RegistrationError>,
    ) -> RegistrationState {
        match outcome {
            Ok(receipt) => {
                info!("[wx-04] Registration confirmed: {}", receipt.tx_hash);
                let state = self.apply(RegistrationEvent::SubmissionConfirmed(receipt));
                if state.is_complete() {
                    self.deliver(identity);
                }
                state
            }
            Err(e) => {
                warn!("[wx-04] Registration failed: {}", e);
                self.apply(RegistrationEvent::SubmissionFailed(e.kind()))
            }
        }
    }
}

/// Ends a run. If the `begin()` future is dropped before the ledger write
/// starts, the session rolls back to `Idle` so the next trigger starts over.
/// A write already in flight keeps running on its own task.
struct RunGuard<'a>(&'a Shared);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        let rolled_back = {
            let mut session = self.0.session.lock();
            session.running = false;
            match session.state {
                RegistrationState::WalletConnected { .. }
                | RegistrationState::StealthIssued { .. } => {
                    warn!("[wx-04] Run abandoned in {}, back to idle", session.state);
                    session.state = RegistrationState::Idle;
                    true
                }
                _ => false,
            }
        };
        if rolled_back {
            self.0.publish();
        }
    }
}

/// Registration coordinator.
pub struct RegistrationCoordinator {
    wallet: Arc<dyn IdentityProvider>,
    issuer: Arc<dyn StealthIssuance>,
    registry: Arc<dyn WriterRegistry>,
    shared: Arc<Shared>,
}

impl RegistrationCoordinator {
    /// Create a coordinator for one session.
    pub fn new(
        wallet: Arc<dyn IdentityProvider>,
        issuer: Arc<dyn StealthIssuance>,
        registry: Arc<dyn WriterRegistry>,
        handoff: Arc<dyn HandoffSink>,
    ) -> Self {
        let initial = RegistrationState::Idle;
        let (status_tx, _) = watch::channel(initial.status());
        Self {
            wallet,
            issuer,
            registry,
            shared: Arc::new(Shared {
                session: Mutex::new(Session {
                    state: initial,
                    running: false,
                    handed_off: false,
                }),
                status_tx,
                handoff,
            }),
        }
    }

    /// The stealth identity, once issued.
    pub fn stealth_identity(&self) -> Option<StealthIdentity> {
        self.shared.session.lock().state.stealth_identity().cloned()
    }

    /// Claim the session for a run. `None` when the trigger must be a no-op.
    fn try_start(&self) -> Option<RunGuard<'_>> {
        let mut session = self.shared.session.lock();
        if session.running {
            debug!("[wx-04] Trigger ignored: run in flight");
            return None;
        }

        match session.state {
            RegistrationState::Idle => {}
            RegistrationState::Failed { .. } => {
                match transition(&session.state, &RegistrationEvent::Retry) {
                    Transition::Next(next) => {
                        info!("[wx-04] Retrying after {}", session.state);
                        session.state = next;
                    }
                    Transition::Ignore => {
                        warn!("[wx-04] Trigger ignored: {} is final", session.state);
                        return None;
                    }
                }
            }
            _ => {
                debug!("[wx-04] Trigger ignored in {}", session.state);
                return None;
            }
        }

        session.running = true;
        drop(session);
        self.shared.publish();
        Some(RunGuard(self.shared.as_ref()))
    }

    async fn run(&self) -> RegistrationState {
        let shared = &self.shared;
        let real = match self.wallet.current_identity().await {
            Ok(identity) => identity,
            Err(e) => {
                warn!("[wx-04] Wallet step failed: {}", e);
                return shared.apply(RegistrationEvent::WalletFailed(e.kind()));
            }
        };
        let state = shared.apply(RegistrationEvent::WalletConnected(real.clone()));
        if !matches!(state, RegistrationState::WalletConnected { .. }) {
            return state;
        }

        let stealth = match self.issuer.issue(&real).await {
            Ok(identity) => identity,
            Err(e) => {
                warn!("[wx-04] Issuance failed: {}", e);
                return shared.apply(RegistrationEvent::IssuanceFailed(e.kind()));
            }
        };
        let state = shared.apply(RegistrationEvent::StealthIssued(stealth));
        if !matches!(state, RegistrationState::StealthIssued { .. }) {
            return state;
        }

        match shared.apply(RegistrationEvent::Branch) {
            RegistrationState::AlreadyRegistered { identity } => {
                shared.deliver(&identity);
                RegistrationState::AlreadyRegistered { identity }
            }
            RegistrationState::Submitting { identity } => self.submit(identity).await,
            other => other,
        }
    }

    /// Send the ledger write on its own task. Dropping the caller does not
    /// cancel the confirmation wait; the task finishes the transition and
    /// the handoff.
    async fn submit(&self, identity: StealthIdentity) -> RegistrationState {
        let shared = Arc::clone(&self.shared);
        let registry = Arc::clone(&self.registry);
        let task = tokio::spawn(async move {
            let outcome = registry.register(&identity).await;
            shared.finish_submission(&identity, outcome)
        });

        match task.await {
            Ok(state) => state,
            Err(e) => {
                warn!("[wx-04] Submission task aborted: {}", e);
                self.shared
                    .apply(RegistrationEvent::SubmissionFailed(FailureKind::ReadError))
            }
        }
    }
}

#[async_trait]
impl RegistrationApi for RegistrationCoordinator {
    async fn begin(&self) -> RegistrationState {
        let Some(_guard) = self.try_start() else {
            return self.state();
        };
        self.run().await
    }

    fn state(&self) -> RegistrationState {
        self.shared.session.lock().state.clone()
    }

    fn status(&self) -> StatusMessage {
        self.shared.status_tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<StatusMessage> {
        self.shared.status_tx.subscribe()
    }
}
