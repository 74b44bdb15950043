//! Canonical API error and `detail` payload normalization.
//!
//! ERROR HANDLING
//! ==============
//! The API reports failures as `{"detail": ...}` where `detail` is a string,
//! a list of validation objects, or an arbitrary object. All three shapes and
//! all transport failures are folded into `ApiError` here, whose `Display` is
//! the one message the presentation layer shows.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;
use serde_json::Value;

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";
pub const NO_TOKEN_MESSAGE: &str = "No token found";

/// Every failure the auth gateway and request dispatcher can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// A required field was empty; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// No response was received (connect failure, timeout).
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// An authenticated call was rejected with 401; the token was cleared.
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,

    /// An authenticated call was attempted without a stored token.
    #[error("{}", NO_TOKEN_MESSAGE)]
    Unauthenticated,

    /// Anything else, carrying the underlying message.
    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    /// HTTP status for server failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// =============================================================================
// DETAIL DECODING
// =============================================================================

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<ErrorDetail>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Items(Vec<Value>),
    Other(Value),
}

impl ErrorDetail {
    fn into_message(self) -> Option<String> {
        match self {
            Self::Message(text) => (!text.is_empty()).then_some(text),
            Self::Items(items) if items.is_empty() => None,
            Self::Items(items) => Some(items.iter().map(item_message).collect::<Vec<_>>().join(", ")),
            Self::Other(value @ Value::Object(_)) => Some(value.to_string()),
            Self::Other(_) => None,
        }
    }
}

fn item_message(item: &Value) -> String {
    match item.get("msg").and_then(Value::as_str) {
        Some(msg) => msg.to_owned(),
        None => item.to_string(),
    }
}

/// Extract a message from an error response body, if it carries one.
pub(crate) fn detail_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(ErrorDetail::into_message)
}

/// Build a server failure from a non-success response.
pub(crate) fn server_error(status: u16, body: &str, fallback: impl FnOnce(u16) -> String) -> ApiError {
    let message = detail_message(body).unwrap_or_else(|| fallback(status));
    ApiError::Server { status, message }
}

/// Read a non-success response into a server failure.
pub(crate) async fn from_response(response: reqwest::Response, fallback: impl FnOnce(u16) -> String) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status, "request rejected by server");
    server_error(status, &body, fallback)
}

/// Map a reqwest failure: "no response" cases get the fixed `unreachable`
/// message, everything else keeps the underlying message.
pub(crate) fn from_transport(error: &reqwest::Error, unreachable: &str) -> ApiError {
    if error.is_timeout() || error.is_request() {
        tracing::debug!(error = %error, "no response from api");
        ApiError::Transport(unreachable.to_owned())
    } else {
        ApiError::Unexpected(error.to_string())
    }
}
