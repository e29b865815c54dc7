//! Retrieval value objects

use serde::{Deserialize, Serialize};

/// A passage returned by similarity search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub content: String,
    /// File the passage was chunked from
    pub source: String,
    /// Cosine similarity, higher is closer
    pub score: f32,
}

impl Passage {
    pub fn new(content: impl Into<String>, source: impl Into<String>, score: f32) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
            score,
        }
    }
}

/// What text is sent to similarity search.
///
/// `Merged` embeds the conversation window in the search query so that
/// follow-ups like "那婚假呢？" stay anchored to the earlier topic; the cost is
/// a noisier query when the user switches topics. `QuestionOnly` searches on
/// the bare question and leaves history to the completion prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    #[default]
    Merged,
    QuestionOnly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_mode_default_is_merged() {
        assert_eq!(QueryMode::default(), QueryMode::Merged);
    }

    #[test]
    fn test_query_mode_tokens() {
        let mode: QueryMode = serde_json::from_str("\"question_only\"").unwrap();
        assert_eq!(mode, QueryMode::QuestionOnly);
    }
}
