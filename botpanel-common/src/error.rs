// ================================================================
// File: botpanel-common/src/error.rs
// ================================================================

use thiserror::Error;

/// Generic failure message used when the bot-control service gives no reason.
pub const DEFAULT_REQUEST_FAILURE: &str = "Request failed";

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Protocol(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Protocol(s.to_string())
    }
}

/// A call to the bot-control service that did not succeed.
///
/// Covers both transport failures and non-success responses. The message is
/// what the operator sees in the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    pub message: String,
}

impl RequestError {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return Self { message: DEFAULT_REQUEST_FAILURE.to_string() };
        }
        Self { message }
    }
}

impl From<Error> for RequestError {
    fn from(err: Error) -> Self {
        RequestError::new(err.to_string())
    }
}

/// Required configuration fields that were left blank.
///
/// Names are kept in form declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in all required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}
