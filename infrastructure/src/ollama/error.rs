//! Error types for the Ollama adapter

use docqa_application::ServiceError;
use thiserror::Error;

/// Result type alias for Ollama operations
pub type Result<T> = std::result::Result<T, OllamaError>;

/// Errors that can occur when talking to the Ollama HTTP API
#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Cannot reach Ollama at {url}: {message}")]
    Connection { url: String, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Ollama returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Expected {expected} embeddings, got {got}")]
    EmbeddingCount { expected: usize, got: usize },
}

impl OllamaError {
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OllamaError::Timeout
        } else if err.is_connect() || err.is_request() {
            OllamaError::Connection {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            OllamaError::Decode(err.to_string())
        } else {
            OllamaError::Connection {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Whether repeating the same request may succeed.
    ///
    /// Server-side 5xx statuses are retried as well as transport failures;
    /// 4xx (unknown model, bad request) are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            OllamaError::Status { status, .. } => *status >= 500,
            other => ServiceError::from(other).is_retryable(),
        }
    }
}

impl From<&OllamaError> for ServiceError {
    fn from(err: &OllamaError) -> Self {
        match err {
            OllamaError::Connection { .. } => ServiceError::ConnectionError(err.to_string()),
            OllamaError::Timeout => ServiceError::Timeout,
            OllamaError::Status { .. } | OllamaError::ClientBuild(_) => {
                ServiceError::RequestFailed(err.to_string())
            }
            OllamaError::Decode(_) | OllamaError::EmbeddingCount { .. } => {
                ServiceError::InvalidResponse(err.to_string())
            }
        }
    }
}

impl From<OllamaError> for ServiceError {
    fn from(err: OllamaError) -> Self {
        ServiceError::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_mapping() {
        assert_eq!(ServiceError::from(OllamaError::Timeout), ServiceError::Timeout);
        assert!(matches!(
            ServiceError::from(OllamaError::Connection {
                url: "http://localhost:11434".into(),
                message: "refused".into(),
            }),
            ServiceError::ConnectionError(_)
        ));
        assert!(matches!(
            ServiceError::from(OllamaError::Status {
                status: 404,
                body: "model not found".into(),
            }),
            ServiceError::RequestFailed(_)
        ));
        assert!(matches!(
            ServiceError::from(OllamaError::Decode("eof".into())),
            ServiceError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_retryable() {
        assert!(OllamaError::Timeout.is_retryable());
        assert!(
            OllamaError::Status {
                status: 503,
                body: String::new()
            }
            .is_retryable()
        );
        assert!(
            !OllamaError::Status {
                status: 404,
                body: String::new()
            }
            .is_retryable()
        );
        assert!(!OllamaError::Decode("bad".into()).is_retryable());
    }
}
