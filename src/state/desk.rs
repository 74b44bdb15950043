//! Query submission and result view state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Drives the main search flow: every submitted query is recorded in search
//! history, dispatched to `/summarize`, and its outcome lands in the view
//! state and the API status indicator. One request at a time per call; a
//! later submission simply overwrites the view state of an earlier one.

#[cfg(test)]
#[path = "desk_test.rs"]
mod desk_test;

use crate::history::{SearchHistory, SearchHistoryEntry};
use crate::net::api::{ApiClient, EMPTY_QUERY_MESSAGE};
use crate::net::error::ApiError;
use crate::net::types::{SummaryQuery, SummaryResult};

/// Header indicator for API reachability.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApiStatus {
    #[default]
    Checking,
    Connected,
    Error,
}

impl ApiStatus {
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Checking => "🔄",
            Self::Connected => "✅",
            Self::Error => "❌",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Checking => "Checking...",
            Self::Connected => "API Connected",
            Self::Error => "API Error",
        }
    }
}

/// What the result area shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    pub loading: bool,
    pub result: Option<SummaryResult>,
    pub error: Option<String>,
}

/// Summarize flow: dispatcher, history and the state they feed.
#[derive(Debug)]
pub struct NewsDesk {
    api: ApiClient,
    history: SearchHistory,
    status: ApiStatus,
    view: ViewState,
}

impl NewsDesk {
    #[must_use]
    pub fn new(api: ApiClient, history: SearchHistory) -> Self {
        Self { api, history, status: ApiStatus::Checking, view: ViewState::default() }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    #[must_use]
    pub fn status(&self) -> ApiStatus {
        self.status
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Probe `/health` and update the indicator.
    pub async fn check_api_health(&mut self) -> ApiStatus {
        self.status = if self.api.check_health().await { ApiStatus::Connected } else { ApiStatus::Error };
        self.status
    }

    /// Record `query` in history, fetch its summary and update the view.
    ///
    /// A blank query is rejected before anything is recorded or sent.
    ///
    /// # Errors
    ///
    /// Returns the dispatcher's error; its message is also kept in the view.
    pub async fn submit(&mut self, query: SummaryQuery) -> Result<&SummaryResult, ApiError> {
        if query.query.trim().is_empty() {
            return Err(ApiError::Validation(EMPTY_QUERY_MESSAGE.to_owned()));
        }

        self.history.save(&query);
        self.view = ViewState { loading: true, result: None, error: None };

        let outcome = self.api.fetch_summary(&query).await;
        self.view.loading = false;
        match outcome {
            Ok(result) => {
                self.status = ApiStatus::Connected;
                Ok(&*self.view.result.insert(result))
            }
            Err(e) => {
                self.status = ApiStatus::Error;
                self.view.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Resubmit a saved search by history id. `Ok(None)` when the id is gone.
    ///
    /// # Errors
    ///
    /// Same as [`NewsDesk::submit`].
    pub async fn rerun(&mut self, id: i64) -> Result<Option<&SummaryResult>, ApiError> {
        let Some(entry) = self.history.get(id) else {
            return Ok(None);
        };
        self.submit(entry.to_query()).await.map(Some)
    }

    #[must_use]
    pub fn recent_searches(&self) -> Vec<SearchHistoryEntry> {
        self.history.list()
    }
}
