//! Retrieval Service port

use super::error::ServiceError;
use async_trait::async_trait;
use docqa_domain::{Category, Passage};

/// Similarity search over per-category indexes
///
/// How many passages come back, and how they are ranked, is owned by the
/// implementation.
#[async_trait]
pub trait RetrievalService: Send + Sync {
    /// Whether a retrieval index has been built for `category`
    async fn index_exists(&self, category: Category) -> bool;

    /// Passages most similar to `query`, best first
    async fn retrieve(&self, category: Category, query: &str) -> Result<Vec<Passage>, ServiceError>;
}
