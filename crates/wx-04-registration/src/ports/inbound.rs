//! # Inbound Ports

use async_trait::async_trait;
use shared_types::StatusMessage;
use tokio::sync::watch;

use crate::domain::RegistrationState;

/// Registration API - inbound port.
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// Drive the handshake to a branch or terminal state and return it.
    ///
    /// Triggers while a run is in flight, or after the session completed,
    /// return the current state without side effects.
    async fn begin(&self) -> RegistrationState;

    /// Current state.
    fn state(&self) -> RegistrationState;

    /// Current status line.
    fn status(&self) -> StatusMessage;

    /// Observe status changes.
    fn subscribe(&self) -> watch::Receiver<StatusMessage>;
}
