use docqa_application::ServiceError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors of the on-disk index store
#[derive(Error, Debug)]
pub enum IndexStoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt index {path}: {message}")]
    Corrupt { path: PathBuf, message: String },

    #[error("Embedding dimension mismatch: index has {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Index writer task failed: {0}")]
    Task(String),
}

impl IndexStoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IndexStoreError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<IndexStoreError> for ServiceError {
    fn from(err: IndexStoreError) -> Self {
        ServiceError::StorageError(err.to_string())
    }
}
