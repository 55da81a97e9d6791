//! Client error model.

use thiserror::Error;

/// Failure reported by a [`Transport`](crate::Transport).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request never produced a response (connect, I/O, TLS...).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The request path could not be resolved against the base URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error surfaced by [`ProductService`](crate::ProductService) operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request payload could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),

    /// The response body was not the expected JSON.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status of a rejected request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Invalid client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
