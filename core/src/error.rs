//! Error types for the todo page.
//!
//! # Design
//! `NotFound` gets a dedicated variant because a remove racing another client
//! is the one failure callers routinely want to tell apart. Every other
//! non-2xx response lands in `Http` with the raw status and body.
//!
//! `ApiError` is `Clone` so the list fetch can keep the last failure inside
//! `MemoState` and hand out snapshots of it.

/// Errors returned by `TodoApi` parse methods and by page actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404 — the todo does not exist (anymore).
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Failure to execute an `HttpRequest` at all.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("blocking request task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        ApiError::Transport(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: &'static str },
}
