//! Auth-token persistence.
//!
//! Presence of the token is the only authentication signal the client keeps;
//! contents and expiry are never inspected. The API decides validity.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::storage::{self, SharedStore};

pub const TOKEN_KEY: &str = "access_token";

/// Token store over shared durable storage.
#[derive(Clone)]
pub struct SessionStore {
    store: SharedStore,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("has_token", &self.has_token()).finish()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn set_token(&self, token: &str) {
        if let Err(e) = self.store.set(TOKEN_KEY, token) {
            tracing::warn!(error = %e, "failed to persist session token");
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn clear_token(&self) {
        storage::remove_logged(self.store.as_ref(), TOKEN_KEY);
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }
}
