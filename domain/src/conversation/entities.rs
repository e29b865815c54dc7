//! Conversation entities

use serde::{Deserialize, Serialize};

/// One question/answer exchange (Value Object)
///
/// Immutable once created; only the orchestrator creates turns, after a
/// successful answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    question: String,
    answer: String,
}

impl ConversationTurn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// Conversation history of one session, oldest turn first.
///
/// Owned by the session layer. The pipeline reads it and hands back an
/// extended copy; it never keeps a reference between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    history: Vec<ConversationTurn>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_turns(history: Vec<ConversationTurn>) -> Self {
        Self { history }
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// The most recent `max_turns` turns, still oldest first.
    pub fn recent(&self, max_turns: usize) -> &[ConversationTurn] {
        let start = self.history.len().saturating_sub(max_turns);
        &self.history[start..]
    }

    /// A copy of this state with `turn` appended.
    pub fn with_turn(&self, turn: ConversationTurn) -> Self {
        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.extend_from_slice(&self.history);
        history.push(turn);
        Self { history }
    }
}
