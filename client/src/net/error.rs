//! Typed failures for storefront API calls.
//!
//! ERROR HANDLING
//! ==============
//! Pages never show transport details. They ask for `user_message(fallback)`,
//! which prefers the server's `{ "error": ... }` text and otherwise uses the
//! page-specific fallback. `Unauthorized` is singled out because any 401
//! tears down the session.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use super::types::ErrorBody;

/// Errors produced by storefront API calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the bearer token or credentials (HTTP 401).
    #[error("unauthorized")]
    Unauthorized { message: Option<String> },

    /// The server returned another non-success status.
    #[error("API response error: status {status}")]
    Status { status: u16, message: Option<String> },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Decode(String),

    /// HTTP is only available in the browser build.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Build an error from a non-success status and its raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = server_message(body);
        if status == 401 {
            Self::Unauthorized { message }
        } else {
            Self::Status { status, message }
        }
    }

    /// True for authorization failures that must end the session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Server-provided message, if the body carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message } | Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text for an alert: the server's message verbatim, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }
}

/// Pull a non-empty `error` field out of a JSON failure body.
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .map(|msg| msg.trim().to_owned())
        .filter(|msg| !msg.is_empty())
}
