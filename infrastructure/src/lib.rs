//! Infrastructure layer for docqa
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Ollama HTTP client, the file-backed
//! vector indexes, document ingestion, transcript logging and
//! configuration file loading.

pub mod config;
pub mod documents;
pub mod logging;
pub mod ollama;
pub mod vector_store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileIngestConfig, FileLoggingConfig,
    FileOllamaConfig, FileOutputConfig, FileOutputFormat, FileReplConfig, FileRetrievalConfig,
    FileStorageConfig,
};
pub use documents::{DocumentError, DocumentLoader, LoadedDocument, RecursiveSplitter};
pub use logging::JsonlConversationLogger;
pub use ollama::{OllamaClient, OllamaError, RetryPolicy};
pub use vector_store::{FileIndexStore, IndexStoreError, LocalRetrievalService, VectorIndex};
