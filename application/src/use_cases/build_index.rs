//! Build Index use case.
//!
//! Embeds cleaned document chunks and appends them to a category's
//! retrieval index. Chunking and text cleanup happen before this step, in
//! the infrastructure document loader.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::embedding::EmbeddingService;
use crate::ports::error::ServiceError;
use crate::ports::index_store::{IndexEntry, IndexStore};
use docqa_domain::{Category, DocumentChunk};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while building an index
#[derive(Error, Debug)]
pub enum BuildIndexError {
    #[error("No text content to index")]
    NoContent,

    #[error("Embedding service returned {got} vectors for {expected} chunks")]
    EmbeddingMismatch { expected: usize, got: usize },

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

/// Result of a successful build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildIndexOutput {
    pub category: Category,
    /// Chunks embedded in this run
    pub added: usize,
    /// Entries in the index afterwards
    pub total: usize,
}

/// Use case for embedding chunks into a category index
pub struct BuildIndexUseCase {
    embedder: Arc<dyn EmbeddingService>,
    store: Arc<dyn IndexStore>,
    batch_size: usize,
    concurrency: usize,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl BuildIndexUseCase {
    pub fn new(embedder: Arc<dyn EmbeddingService>, store: Arc<dyn IndexStore>) -> Self {
        Self {
            embedder,
            store,
            batch_size: 16,
            concurrency: 2,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Number of embedding batches in flight at once
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub async fn execute(
        &self,
        category: Category,
        chunks: Vec<DocumentChunk>,
    ) -> Result<BuildIndexOutput, BuildIndexError> {
        let chunks: Vec<_> = chunks
            .into_iter()
            .filter(|c| !c.content.trim().is_empty())
            .collect();
        if chunks.is_empty() {
            return Err(BuildIndexError::NoContent);
        }

        info!(
            "Embedding {} chunks for {} in batches of {}",
            chunks.len(),
            category,
            self.batch_size
        );

        let batches: Vec<Vec<DocumentChunk>> = chunks
            .chunks(self.batch_size)
            .map(<[DocumentChunk]>::to_vec)
            .collect();

        // `buffered` keeps batch order, so entries stay in document order
        let entries: Vec<Vec<IndexEntry>> = stream::iter(batches)
            .map(|batch| self.embed_batch(batch))
            .buffered(self.concurrency)
            .try_collect()
            .await?;
        let entries: Vec<IndexEntry> = entries.into_iter().flatten().collect();
        let added = entries.len();

        let total = self.store.append(category, entries).await?;
        info!("Index {} now holds {} entries (+{})", category, total, added);

        self.conversation_logger.log(&ConversationEvent::IndexBuilt {
            category,
            added,
            total,
        });

        Ok(BuildIndexOutput {
            category,
            added,
            total,
        })
    }

    async fn embed_batch(&self, batch: Vec<DocumentChunk>) -> Result<Vec<IndexEntry>, BuildIndexError> {
        let texts: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();
        let vectors = self.embedder.embed(&texts).await?;
        if vectors.len() != batch.len() {
            return Err(BuildIndexError::EmbeddingMismatch {
                expected: batch.len(),
                got: vectors.len(),
            });
        }
        debug!("Embedded batch of {}", batch.len());

        Ok(batch
            .into_iter()
            .zip(vectors)
            .map(|(chunk, embedding)| IndexEntry { chunk, embedding })
            .collect())
    }
}
