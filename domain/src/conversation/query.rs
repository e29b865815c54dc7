//! Answerer input/output contracts

use super::entities::ConversationTurn;
use crate::category::Category;
use serde::{Deserialize, Serialize};

/// Input to the retrieval-augmented answerer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub question: String,
    pub category: Category,
    /// Prior turns, oldest first
    pub context_window: Vec<ConversationTurn>,
}

impl QueryRequest {
    pub fn new(question: impl Into<String>, category: Category) -> Self {
        Self {
            question: question.into(),
            category,
            context_window: Vec::new(),
        }
    }

    pub fn with_context(mut self, turns: &[ConversationTurn]) -> Self {
        self.context_window = turns.to_vec();
        self
    }
}

/// Output of the retrieval-augmented answerer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    pub answer: String,
    pub category: Category,
}

impl QueryResult {
    pub fn new(answer: impl Into<String>, category: Category) -> Self {
        Self {
            answer: answer.into(),
            category,
        }
    }
}
