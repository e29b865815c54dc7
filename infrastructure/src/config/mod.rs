//! Configuration file loading for docqa
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./docqa.toml` or `./.docqa.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/docqa/config.toml`
//! 4. Environment: `DOCQA_*` (nested with `__`) and `OLLAMA_BASE_URL`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileIngestConfig, FileLoggingConfig, FileOllamaConfig,
    FileOutputConfig, FileOutputFormat, FileReplConfig, FileRetrievalConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
