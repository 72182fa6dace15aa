//! Error types for the LayerX clients.

use thiserror::Error;

/// Errors that can occur when calling the control plane.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The control plane rejected the request.
    #[error("{kind} (HTTP {status}): {message}")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },

    /// Base URL or endpoint could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ClientError {
    /// Error kind reported by the control plane, e.g. `NodeNotFound`.
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::Api { kind, .. } => Some(kind),
            _ => None,
        }
    }
}
