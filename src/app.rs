//! Wiring for one page load or one CLI invocation.
//!
//! `App` owns the session context, the summarize flow and the theme
//! preference, all sharing one storage handle and one HTTP backend.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use crate::config::{Endpoint, Timeouts};
use crate::history::SearchHistory;
use crate::net::Backend;
use crate::net::api::ApiClient;
use crate::net::auth::AuthGateway;
use crate::session::SessionStore;
use crate::state::auth::{AuthStatus, SessionContext};
use crate::state::desk::{ApiStatus, NewsDesk};
use crate::storage::SharedStore;
use crate::util::theme::ThemePreference;

#[derive(Debug)]
pub struct App {
    pub session: SessionContext,
    pub desk: NewsDesk,
    pub theme: ThemePreference,
}

impl App {
    #[must_use]
    pub fn new(endpoint: Endpoint, store: SharedStore, timeouts: Timeouts) -> Self {
        let backend = Backend::new(endpoint, SessionStore::new(store.clone()));
        Self {
            session: SessionContext::new(AuthGateway::new(backend.clone(), timeouts.auth)),
            desk: NewsDesk::new(ApiClient::new(backend, timeouts), SearchHistory::new(store.clone())),
            theme: ThemePreference::new(store),
        }
    }

    /// Browser wiring: `localStorage`, `window` endpoint sources, console logging.
    #[must_use]
    pub fn browser() -> Self {
        crate::util::logging::init_browser();
        let app = Self::new(
            Endpoint::Browser,
            std::rc::Rc::new(crate::storage::LocalStorage),
            Timeouts::default(),
        );
        crate::util::theme::apply(app.theme.load());
        app
    }

    /// Startup sequence: session check, then API health probe.
    pub async fn start(&mut self) -> (AuthStatus, ApiStatus) {
        let auth = self.session.initialize().await.clone();
        let api = self.desk.check_api_health().await;
        (auth, api)
    }

    /// Run the startup sequence on an owned app, logging where it settled.
    pub async fn launch(mut self) -> (AuthStatus, ApiStatus) {
        let (auth, api) = self.start().await;
        tracing::info!(
            authenticated = matches!(auth, AuthStatus::Authenticated(_)),
            api = api.label(),
            "app started"
        );
        (auth, api)
    }
}
