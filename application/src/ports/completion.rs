//! Completion Service port
//!
//! Plain text in, plain text out. No streaming, no structured output.

use super::error::ServiceError;
use async_trait::async_trait;

/// A locally hosted language model
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Generate a completion for `prompt`
    async fn invoke(&self, prompt: &str) -> Result<String, ServiceError>;
}
