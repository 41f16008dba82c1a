//! Client error types.

use spacetravelling_core::storage::RepositoryError;
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the Prismic API.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid API endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("API did not advertise a master ref")]
    MissingMasterRef,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ClientError> for RepositoryError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Request(e) if e.is_connect() || e.is_timeout() => {
                RepositoryError::ConnectionFailed(e.to_string())
            }
            ClientError::NotFound { resource } => RepositoryError::NotFound {
                entity_type: "Document",
                id: resource,
            },
            ClientError::Json(e) => RepositoryError::Serialization(e.to_string()),
            other => RepositoryError::QueryFailed(other.to_string()),
        }
    }
}
