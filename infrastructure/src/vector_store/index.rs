//! In-memory form of one category index

use super::error::IndexStoreError;
use super::math::top_k_by_cosine;
use docqa_application::{IndexEntry, IndexStats};
use docqa_domain::Category;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// On-disk format version
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// All chunks and embeddings of one category.
///
/// Every embedding in an index has the same dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorIndex {
    pub version: u32,
    pub entries: Vec<IndexEntry>,
}

impl Default for VectorIndex {
    fn default() -> Self {
        Self {
            version: INDEX_FORMAT_VERSION,
            entries: Vec::new(),
        }
    }
}

impl VectorIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimension(&self) -> Option<usize> {
        self.entries.first().map(|e| e.embedding.len())
    }

    /// Add `incoming`, replacing every existing entry of the sources it
    /// covers.
    ///
    /// A re-ingested document may yield fewer chunks than before, so its old
    /// entries are dropped as a whole rather than overwritten by chunk id.
    /// On a dimension mismatch the index is left untouched.
    pub fn merge(&mut self, incoming: Vec<IndexEntry>) -> Result<(), IndexStoreError> {
        let mut expected = self.dimension();
        for entry in &incoming {
            let got = entry.embedding.len();
            match expected {
                Some(dim) if dim != got => {
                    return Err(IndexStoreError::DimensionMismatch { expected: dim, got });
                }
                None => expected = Some(got),
                _ => {}
            }
        }

        let replaced: HashSet<&str> = incoming.iter().map(|e| e.chunk.source.as_str()).collect();
        self.entries
            .retain(|e| !replaced.contains(e.chunk.source.as_str()));

        let mut positions: HashMap<String, usize> = HashMap::new();
        for entry in incoming {
            let id = entry.chunk.id();
            match positions.get(&id) {
                Some(&pos) => self.entries[pos] = entry,
                None => {
                    positions.insert(id, self.entries.len());
                    self.entries.push(entry);
                }
            }
        }
        Ok(())
    }

    /// Closest `k` entries to `query`, best first.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(&IndexEntry, f32)>, IndexStoreError> {
        if let Some(dim) = self.dimension()
            && dim != query.len()
        {
            return Err(IndexStoreError::DimensionMismatch {
                expected: dim,
                got: query.len(),
            });
        }

        let ranked = top_k_by_cosine(
            query,
            self.entries.iter().map(|e| e.embedding.as_slice()),
            k,
        );
        Ok(ranked
            .into_iter()
            .map(|(idx, score)| (&self.entries[idx], score))
            .collect())
    }

    pub fn stats(&self, category: Category) -> IndexStats {
        let sources: BTreeSet<&str> = self
            .entries
            .iter()
            .map(|e| e.chunk.source.as_str())
            .collect();
        IndexStats {
            category,
            entries: self.entries.len(),
            sources: sources.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docqa_domain::DocumentChunk;

    fn entry(source: &str, idx: usize, content: &str, embedding: Vec<f32>) -> IndexEntry {
        IndexEntry {
            chunk: DocumentChunk::new(source, idx, content),
            embedding,
        }
    }

    #[test]
    fn test_merge_replaces_whole_source() {
        let mut index = VectorIndex::default();
        index
            .merge(vec![
                entry("a.txt", 0, "old", vec![1.0, 0.0]),
                entry("a.txt", 1, "old tail", vec![0.0, 1.0]),
                entry("b.txt", 0, "keep", vec![0.5, 0.5]),
            ])
            .unwrap();
        index
            .merge(vec![entry("a.txt", 0, "new", vec![1.0, 1.0])])
            .unwrap();

        let contents: Vec<_> = index.entries.iter().map(|e| e.chunk.content.as_str()).collect();
        assert_eq!(contents, vec!["keep", "new"]);
    }

    #[test]
    fn test_shrinking_reingest_drops_stale_chunks() {
        let mut index = VectorIndex::default();
        index
            .merge(vec![
                entry("policy.txt", 0, "v1 加班 1.0 倍", vec![1.0, 0.0]),
                entry("policy.txt", 1, "v1 第二段", vec![0.0, 1.0]),
                entry("policy.txt", 2, "v1 第三段", vec![0.6, 0.8]),
            ])
            .unwrap();
        index
            .merge(vec![entry("policy.txt", 0, "v2 加班 1.34 倍", vec![1.0, 0.0])])
            .unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.entries[0].chunk.content, "v2 加班 1.34 倍");
        assert_eq!(index.stats(Category::HrFinance).sources, 1);
    }

    #[test]
    fn test_duplicate_ids_in_one_batch_keep_last() {
        let mut index = VectorIndex::default();
        index
            .merge(vec![
                entry("a.txt", 0, "first", vec![1.0]),
                entry("a.txt", 0, "second", vec![1.0]),
            ])
            .unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.entries[0].chunk.content, "second");
    }

    #[test]
    fn test_merge_rejects_dimension_mismatch() {
        let mut index = VectorIndex::default();
        index
            .merge(vec![entry("a.txt", 0, "x", vec![1.0, 0.0])])
            .unwrap();

        let err = index
            .merge(vec![entry("a.txt", 0, "y", vec![1.0, 0.0, 0.0])])
            .unwrap_err();
        assert!(matches!(
            err,
            IndexStoreError::DimensionMismatch {
                expected: 2,
                got: 3
            }
        ));
        assert_eq!(index.len(), 1);
        assert_eq!(index.entries[0].chunk.content, "x");
    }

    #[test]
    fn test_search_ranks_by_cosine() {
        let mut index = VectorIndex::default();
        index
            .merge(vec![
                entry("hr.txt", 0, "加班費", vec![1.0, 0.0]),
                entry("hr.txt", 1, "婚假", vec![0.0, 1.0]),
                entry("hr.txt", 2, "特休", vec![0.6, 0.8]),
            ])
            .unwrap();

        let hits = index.search(&[1.0, 0.1], 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].0.chunk.content, "加班費");
        assert_eq!(hits[1].0.chunk.content, "特休");
        assert!(hits[0].1 > hits[1].1);
    }

    #[test]
    fn test_search_rejects_wrong_query_dimension() {
        let mut index = VectorIndex::default();
        index
            .merge(vec![entry("a.txt", 0, "x", vec![1.0, 0.0])])
            .unwrap();
        assert!(index.search(&[1.0], 1).is_err());
    }

    #[test]
    fn test_stats_counts_distinct_sources() {
        let mut index = VectorIndex::default();
        index
            .merge(vec![
                entry("a.txt", 0, "x", vec![1.0]),
                entry("a.txt", 1, "y", vec![1.0]),
                entry("b.md", 0, "z", vec![1.0]),
            ])
            .unwrap();

        let stats = index.stats(Category::It);
        assert_eq!(stats.entries, 3);
        assert_eq!(stats.sources, 2);
    }
}
