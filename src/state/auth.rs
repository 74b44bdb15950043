//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only place that turns auth-gateway calls into user-visible auth state.
//! Lifecycle is one page load (or one CLI run): starts in `Checking`, settles
//! once `initialize` has run, and moves with login/register/logout.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::auth::AuthGateway;
use crate::net::error::ApiError;
use crate::net::types::{RegisterRequest, User};

/// Where the session stands.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AuthStatus {
    /// Startup session check has not finished.
    #[default]
    Checking,
    Authenticated(User),
    Anonymous,
}

/// Current user plus the gateway used to change it.
#[derive(Debug)]
pub struct SessionContext {
    gateway: AuthGateway,
    status: AuthStatus,
}

impl SessionContext {
    #[must_use]
    pub fn new(gateway: AuthGateway) -> Self {
        Self { gateway, status: AuthStatus::Checking }
    }

    #[must_use]
    pub fn status(&self) -> &AuthStatus {
        &self.status
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match &self.status {
            AuthStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.status, AuthStatus::Authenticated(_))
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.status, AuthStatus::Checking)
    }

    #[must_use]
    pub fn gateway(&self) -> &AuthGateway {
        &self.gateway
    }

    /// Startup session check.
    ///
    /// Without a stored token this settles on `Anonymous` without touching
    /// the network. With one, the token is verified via the current-user
    /// call; any failure clears the token and settles on `Anonymous`.
    pub async fn initialize(&mut self) -> &AuthStatus {
        if !self.gateway.session().has_token() {
            self.status = AuthStatus::Anonymous;
            return &self.status;
        }
        match self.gateway.current_user().await {
            Ok(user) => {
                tracing::debug!(username = %user.username, "session restored");
                self.status = AuthStatus::Authenticated(user);
            }
            Err(e) => {
                tracing::warn!(error = %e, "session check failed");
                self.gateway.session().clear_token();
                self.status = AuthStatus::Anonymous;
            }
        }
        &self.status
    }

    /// Log in, then load the user.
    ///
    /// Rejected credentials leave the state unchanged. If the new token was
    /// stored but the user cannot be loaded, the token is cleared and the
    /// state settles on `Anonymous`, so user and token never disagree.
    ///
    /// # Errors
    ///
    /// Returns the gateway's normalized error from either step.
    pub async fn login(&mut self, username_or_email: &str, password: &str) -> Result<User, ApiError> {
        self.gateway.login(username_or_email, password).await?;
        match self.gateway.current_user().await {
            Ok(user) => {
                self.status = AuthStatus::Authenticated(user.clone());
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "user lookup after login failed");
                self.gateway.session().clear_token();
                self.status = AuthStatus::Anonymous;
                Err(e)
            }
        }
    }

    /// Register, log in with the same credentials, then load the user.
    /// A failed registration leaves the state unchanged; later steps behave
    /// as in [`SessionContext::login`].
    ///
    /// # Errors
    ///
    /// Returns the gateway's normalized error from any step.
    pub async fn register(&mut self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.gateway.register(request).await?;
        self.login(request.username(), request.password()).await
    }

    /// Drop the token and the user immediately.
    pub fn logout(&mut self) {
        self.gateway.logout();
        self.status = AuthStatus::Anonymous;
    }
}
