//! Networking modules for the summarization API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` talks to `/api/auth/*`, `api` to the summarization endpoints,
//! `types` defines the wire schema and `error` folds every failure shape into
//! one `ApiError`.

pub mod api;
pub mod auth;
pub mod error;
pub mod types;

use crate::config::Endpoint;
use crate::session::SessionStore;

/// HTTP client plus the endpoint and token it should use.
///
/// Cheap to clone; clones share the connection pool and token storage.
#[derive(Clone, Debug)]
pub struct Backend {
    http: reqwest::Client,
    endpoint: Endpoint,
    session: SessionStore,
}

impl Backend {
    #[must_use]
    pub fn new(endpoint: Endpoint, session: SessionStore) -> Self {
        Self { http: reqwest::Client::new(), endpoint, session }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let url = self.endpoint.url(path);
        tracing::debug!(%url, "GET");
        self.http.get(url)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let url = self.endpoint.url(path);
        tracing::debug!(%url, "POST");
        self.http.post(url)
    }

    /// Attach the stored token as a bearer credential, if there is one.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}
