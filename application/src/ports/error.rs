//! Errors shared by all outbound service ports

use thiserror::Error;

/// Failure of an outbound service (completion, embedding, retrieval, storage)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ServiceError {
    /// Whether repeating the same call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ServiceError::ConnectionError(_) | ServiceError::Timeout
        )
    }
}
