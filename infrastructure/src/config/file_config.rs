//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use docqa_domain::QueryMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("model name cannot be empty ({0})")]
    EmptyModelName(&'static str),

    #[error("retrieval.top_k must be at least 1")]
    InvalidTopK,

    #[error("ingest.chunk_size must be at least 1")]
    InvalidChunkSize,

    #[error("ingest.chunk_overlap ({overlap}) must be smaller than chunk_size ({size})")]
    OverlapTooLarge { overlap: usize, size: usize },

    #[error("ingest.batch_size must be at least 1")]
    InvalidBatchSize,
}

/// Ollama connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOllamaConfig {
    /// Base URL of the Ollama server
    pub base_url: String,
    /// Model used for classification and answers
    pub llm_model: String,
    /// Model used for embeddings
    pub embed_model: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// Extra attempts after a retryable failure
    pub max_retries: u32,
    /// Initial backoff, doubled on each retry
    pub retry_backoff_ms: u64,
}

impl Default for FileOllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            llm_model: "gemma3:4b".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            timeout_seconds: 120,
            max_retries: 2,
            retry_backoff_ms: 500,
        }
    }
}

impl FileOllamaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

/// Where documents and indexes live on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Root of the per-category vector indexes
    pub vector_dir: PathBuf,
    /// Root of the per-category source documents
    pub document_dir: PathBuf,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            vector_dir: PathBuf::from("vectorDB"),
            document_dir: PathBuf::from("pdfFiles"),
        }
    }
}

/// Retrieval behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    /// Passages returned per query
    pub top_k: usize,
    /// How the retrieval query is built from the conversation
    pub query_mode: QueryMode,
    /// Number of recent turns handed to the answerer
    pub history_window: usize,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            query_mode: QueryMode::Merged,
            history_window: 6,
        }
    }
}

/// Document ingestion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileIngestConfig {
    /// Maximum chunk length in characters
    pub chunk_size: usize,
    /// Characters shared between neighbouring chunks
    pub chunk_overlap: usize,
    /// Chunks per embedding request
    pub batch_size: usize,
}

impl Default for FileIngestConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1500,
            chunk_overlap: 200,
            batch_size: 16,
        }
    }
}

/// Output format for answers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutputFormat {
    #[default]
    Text,
    Json,
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub format: FileOutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: FileOutputFormat::Text,
            color: true,
        }
    }
}

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show progress indicators
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

/// Log destinations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of classifications, answers and index builds
    pub conversation_log: Option<PathBuf>,
    /// Directory for the daily-rolling diagnostic log
    pub log_dir: Option<PathBuf>,
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub ollama: FileOllamaConfig,
    pub storage: FileStorageConfig,
    pub retrieval: FileRetrievalConfig,
    pub ingest: FileIngestConfig,
    pub output: FileOutputConfig,
    pub repl: FileReplConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.ollama.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.ollama.llm_model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName("ollama.llm_model"));
        }
        if self.ollama.embed_model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName("ollama.embed_model"));
        }

        if self.retrieval.top_k == 0 {
            return Err(ConfigValidationError::InvalidTopK);
        }

        if self.ingest.chunk_size == 0 {
            return Err(ConfigValidationError::InvalidChunkSize);
        }
        if self.ingest.chunk_overlap >= self.ingest.chunk_size {
            return Err(ConfigValidationError::OverlapTooLarge {
                overlap: self.ingest.chunk_overlap,
                size: self.ingest.chunk_size,
            });
        }
        if self.ingest.batch_size == 0 {
            return Err(ConfigValidationError::InvalidBatchSize);
        }

        Ok(())
    }
}
