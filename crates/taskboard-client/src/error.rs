//! Error types for the client.

use thiserror::Error;

/// Errors produced by the task repository client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, DNS, TLS, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. The body's `{message}` is kept when present.
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("<no message>"))]
    Status { status: u16, message: Option<String> },

    /// Response body did not decode into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// The message to surface to the caller: the server-provided
    /// `{message}` when present, otherwise the operation's fallback.
    pub fn surface(&self, fallback: &str) -> String {
        match self {
            Self::Status {
                message: Some(msg), ..
            } => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// A surfaced store failure: one human-readable message, reported
/// once and left to the caller. Store state is untouched by the
/// failing operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Surface an API error under the given fallback message.
    pub fn from_api(err: ApiError, fallback: &str) -> Self {
        Self::new(err.surface(fallback))
    }
}
