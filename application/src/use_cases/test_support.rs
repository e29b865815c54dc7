//! Hand-written port doubles shared by the use case tests.

use crate::ports::completion::CompletionService;
use crate::ports::embedding::EmbeddingService;
use crate::ports::error::ServiceError;
use crate::ports::index_store::{IndexEntry, IndexStats, IndexStore};
use crate::ports::retrieval::RetrievalService;
use async_trait::async_trait;
use docqa_domain::{Category, Passage};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Completion service that replays scripted replies and records prompts.
pub(crate) struct ScriptedCompletion {
    replies: Mutex<VecDeque<Result<String, ServiceError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub(crate) fn new(replies: Vec<Result<String, ServiceError>>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from(replies)),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn replying(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub(crate) fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn invoke(&self, prompt: &str) -> Result<String, ServiceError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::RequestFailed("no scripted reply".to_string())))
    }
}

/// Retrieval service over a fixed set of built categories.
pub(crate) struct FakeRetrieval {
    built: Vec<Category>,
    passages: Vec<Passage>,
    failure: Option<ServiceError>,
    queries: Mutex<Vec<(Category, String)>>,
}

impl FakeRetrieval {
    pub(crate) fn with_index(categories: &[Category], passages: Vec<Passage>) -> Self {
        Self {
            built: categories.to_vec(),
            passages,
            failure: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn empty() -> Self {
        Self::with_index(&[], Vec::new())
    }

    pub(crate) fn failing(categories: &[Category], error: ServiceError) -> Self {
        Self {
            failure: Some(error),
            ..Self::with_index(categories, Vec::new())
        }
    }

    pub(crate) fn queries(&self) -> Vec<(Category, String)> {
        self.queries.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl RetrievalService for FakeRetrieval {
    async fn index_exists(&self, category: Category) -> bool {
        self.built.contains(&category)
    }

    async fn retrieve(&self, category: Category, query: &str) -> Result<Vec<Passage>, ServiceError> {
        self.queries
            .lock()
            .unwrap()
            .push((category, query.to_string()));
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(self.passages.clone()),
        }
    }
}

/// Embedder returning `[len, index]` for each text.
pub(crate) struct LengthEmbedding {
    batches: Mutex<Vec<usize>>,
    fail: bool,
}

impl LengthEmbedding {
    pub(crate) fn new() -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub(crate) fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmbeddingService for LengthEmbedding {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ServiceError> {
        self.batches.lock().unwrap().push(texts.len());
        if self.fail {
            return Err(ServiceError::ConnectionError("embedder down".to_string()));
        }
        Ok(texts
            .iter()
            .enumerate()
            .map(|(i, t)| vec![t.chars().count() as f32, i as f32])
            .collect())
    }
}

/// In-memory index store.
#[derive(Default)]
pub(crate) struct MemoryIndexStore {
    indexes: Mutex<HashMap<Category, Vec<IndexEntry>>>,
}

impl MemoryIndexStore {
    pub(crate) fn entries(&self, category: Category) -> Vec<IndexEntry> {
        self.indexes
            .lock()
            .unwrap()
            .get(&category)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl IndexStore for MemoryIndexStore {
    async fn append(&self, category: Category, entries: Vec<IndexEntry>) -> Result<usize, ServiceError> {
        let mut indexes = self.indexes.lock().unwrap();
        let index = indexes.entry(category).or_default();
        index.retain(|e| !entries.iter().any(|n| n.chunk.source == e.chunk.source));
        index.extend(entries);
        Ok(index.len())
    }

    async fn stats(&self, category: Category) -> Result<Option<IndexStats>, ServiceError> {
        let indexes = self.indexes.lock().unwrap();
        Ok(indexes.get(&category).map(|entries| {
            let mut sources: Vec<_> = entries.iter().map(|e| e.chunk.source.as_str()).collect();
            sources.sort_unstable();
            sources.dedup();
            IndexStats {
                category,
                entries: entries.len(),
                sources: sources.len(),
            }
        }))
    }
}
