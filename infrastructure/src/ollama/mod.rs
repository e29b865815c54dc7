//! Ollama adapter
//!
//! Implements CompletionService and EmbeddingService over the Ollama HTTP API.

pub mod client;
pub mod error;
mod protocol;

pub use client::{OllamaClient, RetryPolicy};
pub use error::OllamaError;
