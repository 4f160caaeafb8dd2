//! Stub `POST /create-writer` service.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use wx_01_stealth_issuer::CREATE_WRITER_PATH;
use wx_02_ledger_client::abi;

/// How the stub answers.
#[derive(Debug, Clone, PartialEq)]
pub enum IssuerBehavior {
    /// Remember identities; answer `present: "already"` on repeats.
    Remember,
    /// Answer 200 without `stealthAddress`.
    MissingField,
    /// Answer HTTP 500.
    ServerError,
    /// Answer with a fixed `present` value.
    PresentValue(Value),
}

struct IssuerState {
    behavior: Mutex<IssuerBehavior>,
    known: Mutex<HashMap<String, String>>,
    requests: Mutex<Vec<Value>>,
}

/// A running stub issuance service.
pub struct StubIssuer {
    addr: SocketAddr,
    state: Arc<IssuerState>,
}

impl StubIssuer {
    /// Start the service with `behavior`.
    pub async fn start(behavior: IssuerBehavior) -> Self {
        let state = Arc::new(IssuerState {
            behavior: Mutex::new(behavior),
            known: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .route(CREATE_WRITER_PATH, post(create_writer))
            .with_state(state.clone());
        let addr = super::spawn_server(app).await;
        Self { addr, state }
    }

    /// Base URL to configure the client with.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Change how later requests are answered.
    pub fn set_behavior(&self, behavior: IssuerBehavior) {
        *self.state.behavior.lock() = behavior;
    }

    /// Request bodies received so far.
    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().clone()
    }

    /// The alias the stub derives for `address`.
    pub fn alias_for(address: &str) -> String {
        let digest = abi::keccak256(address.as_bytes());
        format!("0x{}", hex::encode(&digest[..20]))
    }
}

async fn create_writer(State(state): State<Arc<IssuerState>>, Json(body): Json<Value>) -> Response {
    state.requests.lock().push(body.clone());
    let address = body["address"].as_str().unwrap_or_default().to_string();
    let alias = StubIssuer::alias_for(&address);

    let behavior = state.behavior.lock().clone();
    match behavior {
        IssuerBehavior::Remember => {
            let previous = state.known.lock().insert(address, alias.clone());
            let body = match previous {
                Some(_) => json!({ "stealthAddress": alias, "present": "already" }),
                None => json!({ "stealthAddress": alias }),
            };
            Json(body).into_response()
        }
        IssuerBehavior::MissingField => Json(json!({ "present": "already" })).into_response(),
        IssuerBehavior::ServerError => {
            (StatusCode::INTERNAL_SERVER_ERROR, "issuer exploded").into_response()
        }
        IssuerBehavior::PresentValue(present) => {
            Json(json!({ "stealthAddress": alias, "present": present })).into_response()
        }
    }
}
