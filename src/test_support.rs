//! In-process fake of the summarization API for tests.
//!
//! Serves canned responses keyed by method + path from an Axum router bound
//! to `127.0.0.1:0`, and records every request it receives.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

use crate::config::{Endpoint, EndpointSources};
use crate::net::Backend;
use crate::session::SessionStore;
use crate::storage::{MemoryStorage, SharedStore};

#[derive(Clone, Debug)]
pub(crate) struct Canned {
    method: Method,
    path: &'static str,
    status: StatusCode,
    body: String,
    json: bool,
    delay: Option<Duration>,
}

impl Canned {
    pub(crate) fn json(method: Method, path: &'static str, status: u16, body: serde_json::Value) -> Self {
        Self {
            method,
            path,
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
            json: true,
            delay: None,
        }
    }

    pub(crate) fn text(method: Method, path: &'static str, status: u16, body: &str) -> Self {
        Self {
            method,
            path,
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_owned(),
            json: false,
            delay: None,
        }
    }

    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Clone, Debug)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub(crate) fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

#[derive(Clone, Default)]
struct FakeState {
    routes: Arc<Vec<Canned>>,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub(crate) struct FakeApi {
    pub base_url: String,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeApi {
    pub(crate) async fn start(routes: Vec<Canned>) -> Self {
        let state = FakeState { routes: Arc::new(routes), log: Arc::default() };
        let log = state.log.clone();
        let router = Router::new().fallback(handle).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { base_url: format!("http://{addr}"), log }
    }

    pub(crate) fn endpoint(&self) -> Endpoint {
        Endpoint::from(EndpointSources::with_override(self.base_url.clone()))
    }

    pub(crate) fn backend(&self, session: SessionStore) -> Backend {
        Backend::new(self.endpoint(), session)
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.log.lock().unwrap().clone()
    }

    pub(crate) fn hits(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}

async fn handle(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_str = |name: header::HeaderName| {
        headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned)
    };
    state.log.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_owned(),
        query: uri.query().map(str::to_owned),
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let Some(canned) = state
        .routes
        .iter()
        .find(|c| c.method == method && c.path == uri.path())
        .cloned()
    else {
        return (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, "application/json")], r#"{"detail":"Not Found"}"#)
            .into_response();
    };

    if let Some(delay) = canned.delay {
        tokio::time::sleep(delay).await;
    }
    let content_type = if canned.json { "application/json" } else { "text/plain" };
    (canned.status, [(header::CONTENT_TYPE, content_type)], canned.body).into_response()
}

/// A base URL nothing listens on.
pub(crate) async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub(crate) fn memory_session() -> (SharedStore, SessionStore) {
    let store = MemoryStorage::shared();
    let session = SessionStore::new(store.clone());
    (store, session)
}
