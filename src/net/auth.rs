//! Auth gateway for `/api/auth/*`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login uses the password-grant convention (form-encoded `username` +
//! `password`) and stores the returned bearer token. Every other call sends
//! JSON. The only side effects are on the token store; user data is returned
//! to the caller and never cached here.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::time::Duration;

use super::Backend;
use super::error::{self, ApiError};
use super::types::{RegisterRequest, TokenResponse, User};
use crate::session::SessionStore;

const REGISTER_PATH: &str = "/api/auth/register";
const LOGIN_PATH: &str = "/api/auth/login";
const ME_PATH: &str = "/api/auth/me";

const AUTH_UNREACHABLE: &str = "Cannot connect to API server. Please check your connection.";
const ME_UNREACHABLE: &str = "Cannot connect to API server.";

fn register_failed_message(status: u16) -> String {
    format!("Registration failed: {status}")
}

fn login_failed_message(status: u16) -> String {
    format!("Login failed: {status}")
}

fn user_info_failed_message(status: u16) -> String {
    format!("Failed to get user info: {status}")
}

/// Register/login/session-check calls against the API.
#[derive(Clone, Debug)]
pub struct AuthGateway {
    backend: Backend,
    timeout: Duration,
}

impl AuthGateway {
    #[must_use]
    pub fn new(backend: Backend, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        self.backend.session()
    }

    /// Create an account via `POST /api/auth/register`.
    ///
    /// # Errors
    ///
    /// Returns the normalized server message, or a transport failure.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        tracing::debug!(username = request.username(), "registering");
        let response = self
            .backend
            .post(REGISTER_PATH)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| error::from_transport(&e, AUTH_UNREACHABLE))?;

        if !response.status().is_success() {
            return Err(error::from_response(response, register_failed_message).await);
        }
        response
            .json::<User>()
            .await
            .map_err(|e| ApiError::Unexpected(e.to_string()))
    }

    /// Exchange credentials for a token via `POST /api/auth/login` and store it.
    ///
    /// # Errors
    ///
    /// Returns the normalized server message, or a transport failure. The
    /// stored token is untouched on failure.
    pub async fn login(&self, username_or_email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let response = self
            .backend
            .post(LOGIN_PATH)
            .timeout(self.timeout)
            .form(&[("username", username_or_email), ("password", password)])
            .send()
            .await
            .map_err(|e| error::from_transport(&e, AUTH_UNREACHABLE))?;

        if !response.status().is_success() {
            return Err(error::from_response(response, login_failed_message).await);
        }
        let token = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| ApiError::Unexpected(e.to_string()))?;

        if !token.access_token.is_empty() {
            self.session().set_token(&token.access_token);
        }
        tracing::info!(username = username_or_email, "logged in");
        Ok(token)
    }

    /// Fetch the user behind the stored token via `GET /api/auth/me`.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` without a stored token (no request is sent).
    /// - `SessionExpired` on 401; the token is cleared first.
    /// - otherwise the normalized server or transport failure.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let Some(token) = self.session().token() else {
            return Err(ApiError::Unauthenticated);
        };

        let response = self
            .backend
            .get(ME_PATH)
            .timeout(self.timeout)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| error::from_transport(&e, ME_UNREACHABLE))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::info!("session token rejected; clearing");
            self.session().clear_token();
            return Err(ApiError::SessionExpired);
        }
        if !status.is_success() {
            return Err(error::from_response(response, user_info_failed_message).await);
        }
        response
            .json::<User>()
            .await
            .map_err(|e| ApiError::Unexpected(e.to_string()))
    }

    /// Forget the stored token. Local only; the API is not called.
    pub fn logout(&self) {
        self.session().clear_token();
    }
}
