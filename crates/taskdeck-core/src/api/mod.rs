//! Typed boundary to the task service REST API.

mod client;
pub mod types;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use client::ApiClient;

/// Convenience alias for API results.
pub type ApiResult<T> = Result<T, ApiError>;

/// Categories of API errors for consistent handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// Client-detected precondition failure; no request was made.
    Validation,
    /// Missing token, or a 401/403 response: the session is not trusted.
    Auth,
    /// Transport failure, unexpected status, or undecodable response.
    Network,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Validation => write!(f, "validation"),
            ApiErrorKind::Auth => write!(f, "auth"),
            ApiErrorKind::Network => write!(f, "network"),
        }
    }
}

/// Structured error from the API boundary with kind and a
/// human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error category.
    pub kind: ApiErrorKind,
    /// One-line summary suitable for display.
    pub message: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a client-side validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, message)
    }

    /// Creates an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Auth, message)
    }

    /// Creates a network/transport error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    /// Builds an error from a non-2xx response body.
    ///
    /// The service reports failures as `{"msg": "..."}`; when that field
    /// is present it becomes the message, otherwise the per-operation
    /// fallback is used. 401/403 always map to [`ApiErrorKind::Auth`].
    pub fn from_response(status: u16, body: &str, fallback: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| {
                json.get("msg")
                    .and_then(Value::as_str)
                    .map(ToString::to_string)
            })
            .unwrap_or_else(|| fallback.to_string());

        let kind = if status == 401 || status == 403 {
            ApiErrorKind::Auth
        } else {
            ApiErrorKind::Network
        };
        Self::new(kind, message)
    }

    /// Returns true for errors that mean the session can no longer be
    /// trusted (implicit-logout trigger).
    pub fn is_auth(&self) -> bool {
        self.kind == ApiErrorKind::Auth
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_response_extracts_msg_field() {
        let err = ApiError::from_response(400, r#"{"msg":"email taken"}"#, "Registration failed");
        assert_eq!(err.kind, ApiErrorKind::Network);
        assert_eq!(err.message, "email taken");
    }

    #[test]
    fn from_response_falls_back_without_msg() {
        let err = ApiError::from_response(500, "<html>oops</html>", "Failed to fetch tasks");
        assert_eq!(err.message, "Failed to fetch tasks");
    }

    #[test]
    fn unauthorized_maps_to_auth_kind() {
        let err = ApiError::from_response(401, r#"{"msg":"token expired"}"#, "Failed");
        assert!(err.is_auth());
        assert_eq!(err.message, "token expired");
    }
}
