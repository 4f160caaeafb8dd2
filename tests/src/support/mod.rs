//! # Stub Services
//!
//! In-process stand-ins for the issuance service and the JSON-RPC node,
//! served with axum on `127.0.0.1:0` so the real reqwest adapters can be
//! exercised end to end.

pub mod issuer;
pub mod node;

pub use issuer::{IssuerBehavior, StubIssuer};
pub use node::StubNode;

use std::net::SocketAddr;

use axum::Router;

/// Serve `app` on an ephemeral local port.
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    addr
}
