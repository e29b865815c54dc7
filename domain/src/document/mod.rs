//! Document ingestion value objects

use serde::{Deserialize, Serialize};

/// A chunk of cleaned document text ready to be embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// File name the chunk came from
    pub source: String,
    /// Position of the chunk within its source
    pub chunk_index: usize,
    pub content: String,
}

impl DocumentChunk {
    pub fn new(source: impl Into<String>, chunk_index: usize, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            chunk_index,
            content: content.into(),
        }
    }

    /// Stable identifier, unique within one category index.
    pub fn id(&self) -> String {
        format!("{}#{}", self.source, self.chunk_index)
    }
}
