//! RetrievalService over the file-backed indexes

use super::file_store::FileIndexStore;
use async_trait::async_trait;
use docqa_application::{EmbeddingService, RetrievalService, ServiceError};
use docqa_domain::{Category, Passage};
use std::sync::Arc;
use tracing::debug;

/// Embeds the query and runs an exact cosine search over the category index.
pub struct LocalRetrievalService {
    store: Arc<FileIndexStore>,
    embedder: Arc<dyn EmbeddingService>,
    top_k: usize,
}

impl LocalRetrievalService {
    pub fn new(store: Arc<FileIndexStore>, embedder: Arc<dyn EmbeddingService>, top_k: usize) -> Self {
        Self {
            store,
            embedder,
            top_k,
        }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }
}

#[async_trait]
impl RetrievalService for LocalRetrievalService {
    async fn index_exists(&self, category: Category) -> bool {
        self.store.exists(category).await
    }

    async fn retrieve(&self, category: Category, query: &str) -> Result<Vec<Passage>, ServiceError> {
        let index = self.store.load(category).await?.ok_or_else(|| {
            ServiceError::StorageError(format!("no index built for {}", category))
        })?;

        let mut vectors = self.embedder.embed(&[query.to_string()]).await?;
        let query_vector = vectors.pop().ok_or_else(|| {
            ServiceError::InvalidResponse("embedding service returned no vector".to_string())
        })?;

        let hits = index
            .search(&query_vector, self.top_k)
            .map_err(ServiceError::from)?;

        debug!(
            "Retrieved {} passages from {} (best score {:?})",
            hits.len(),
            category,
            hits.first().map(|(_, score)| *score)
        );

        Ok(hits
            .into_iter()
            .map(|(entry, score)| {
                Passage::new(entry.chunk.content.clone(), entry.chunk.source.clone(), score)
            })
            .collect())
    }
}
