//! Index Store port
//!
//! Write side of the per-category retrieval indexes, used by ingestion.

use super::error::ServiceError;
use async_trait::async_trait;
use docqa_domain::{Category, DocumentChunk};
use serde::{Deserialize, Serialize};

/// A chunk together with its embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub chunk: DocumentChunk,
    pub embedding: Vec<f32>,
}

/// Summary of one category index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub category: Category,
    pub entries: usize,
    pub sources: usize,
}

#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Add entries to the category index, creating it if needed.
    ///
    /// Every source present in `entries` is replaced as a whole: existing
    /// entries of that source are dropped first, so a shorter revision of a
    /// document leaves no stale chunks behind. Readers must observe either
    /// the previous or the new index, never a mix.
    /// Returns the number of entries in the index afterwards.
    async fn append(&self, category: Category, entries: Vec<IndexEntry>) -> Result<usize, ServiceError>;

    /// Stats for the category index, or `None` if it was never built
    async fn stats(&self, category: Category) -> Result<Option<IndexStats>, ServiceError>;
}
