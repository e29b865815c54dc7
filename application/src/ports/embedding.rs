//! Embedding Service port

use super::error::ServiceError;
use async_trait::async_trait;

/// Converts text into dense vectors.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Embed each text. The result has one vector per input, in input order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ServiceError>;
}
