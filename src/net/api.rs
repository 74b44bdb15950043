//! Request dispatcher for the summarization endpoints.
//!
//! ERROR HANDLING
//! ==============
//! `check_health` collapses every failure to `false`. The fetch calls return
//! `ApiError` with the server's `detail` message, a fixed "cannot connect"
//! message when nothing answered, or the underlying error text. Non-2xx
//! responses never produce partial results. A 401 on a call that carried a
//! token clears it and reports `SessionExpired`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::Backend;
use super::error::{self, ApiError};
use super::types::{Article, ArticleList, ArticlesQuery, SummaryQuery, SummaryResult};
use crate::config::{Endpoint, Timeouts};

const HEALTH_PATH: &str = "/health";
const SUMMARIZE_PATH: &str = "/summarize";
const ARTICLES_PATH: &str = "/articles";

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a news query.";
const SUMMARIZE_UNREACHABLE: &str = "Cannot connect to API server. Please make sure the API is running.";
const ARTICLES_UNREACHABLE: &str = "Cannot connect to API server.";

fn server_error_message(status: u16) -> String {
    format!("Server error: {status}")
}

/// Dispatches health, summarize and article calls, attaching the session
/// token when one is stored.
#[derive(Clone, Debug)]
pub struct ApiClient {
    backend: Backend,
    timeouts: Timeouts,
}

impl ApiClient {
    #[must_use]
    pub fn new(backend: Backend, timeouts: Timeouts) -> Self {
        Self { backend, timeouts }
    }

    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        self.backend.endpoint()
    }

    /// `GET /health`; `true` only on HTTP 200.
    pub async fn check_health(&self) -> bool {
        let result = self
            .backend
            .get(HEALTH_PATH)
            .timeout(self.timeouts.health)
            .send()
            .await;
        match result {
            Ok(response) => {
                let healthy = response.status() == reqwest::StatusCode::OK;
                tracing::debug!(status = response.status().as_u16(), healthy, "health check");
                healthy
            }
            Err(e) => {
                tracing::warn!(error = %e, "health check failed");
                false
            }
        }
    }

    /// `POST /summarize` with the query as JSON body.
    ///
    /// # Errors
    ///
    /// - `Validation` when the query text is blank (no request is sent).
    /// - `Server` with the `detail` message or `Server error: <status>`.
    /// - `Transport` when the API did not answer within the timeout.
    pub async fn fetch_summary(&self, query: &SummaryQuery) -> Result<SummaryResult, ApiError> {
        if query.query.trim().is_empty() {
            return Err(ApiError::Validation(EMPTY_QUERY_MESSAGE.to_owned()));
        }
        let request = self
            .backend
            .post(SUMMARIZE_PATH)
            .timeout(self.timeouts.summarize)
            .json(query);
        let authorized = self.backend.session().has_token();
        let response = self
            .backend
            .authorize(request)
            .send()
            .await
            .map_err(|e| error::from_transport(&e, SUMMARIZE_UNREACHABLE))?;

        if !response.status().is_success() {
            return Err(self.rejected(response, authorized).await);
        }
        let result = response
            .json::<SummaryResult>()
            .await
            .map_err(|e| ApiError::Unexpected(e.to_string()))?;
        tracing::info!(articles_found = result.articles_found, "summary received");
        Ok(result)
    }

    /// `GET /articles?query&location&max_articles`.
    ///
    /// # Errors
    ///
    /// Same classification as [`ApiClient::fetch_summary`].
    pub async fn fetch_articles(&self, query: &ArticlesQuery) -> Result<Vec<Article>, ApiError> {
        if query.query.trim().is_empty() {
            return Err(ApiError::Validation(EMPTY_QUERY_MESSAGE.to_owned()));
        }
        let request = self
            .backend
            .get(ARTICLES_PATH)
            .timeout(self.timeouts.articles)
            .query(query);
        let authorized = self.backend.session().has_token();
        let response = self
            .backend
            .authorize(request)
            .send()
            .await
            .map_err(|e| error::from_transport(&e, ARTICLES_UNREACHABLE))?;

        if !response.status().is_success() {
            return Err(self.rejected(response, authorized).await);
        }
        response
            .json::<ArticleList>()
            .await
            .map(Vec::from)
            .map_err(|e| ApiError::Unexpected(e.to_string()))
    }

    async fn rejected(&self, response: reqwest::Response, authorized: bool) -> ApiError {
        if authorized && response.status() == reqwest::StatusCode::UNAUTHORIZED {
            tracing::info!("session token rejected; clearing");
            self.backend.session().clear_token();
            return ApiError::SessionExpired;
        }
        error::from_response(response, server_error_message).await
    }
}
