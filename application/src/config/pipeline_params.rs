//! Pipeline parameters: conversation turn control.
//!
//! These are application-layer concerns, not domain policy.

use docqa_domain::QueryMode;
use serde::{Deserialize, Serialize};

/// Parameters for [`RunConversationUseCase`](crate::use_cases::run_conversation::RunConversationUseCase)
/// and [`AnswerQuestionUseCase`](crate::use_cases::answer_question::AnswerQuestionUseCase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Most recent turns handed to the answerer as context.
    /// The full history is still kept by the caller.
    pub history_window: usize,
    /// What the retrieval query is built from.
    pub query_mode: QueryMode,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            history_window: 6,
            query_mode: QueryMode::Merged,
        }
    }
}

impl PipelineParams {
    pub fn with_history_window(mut self, turns: usize) -> Self {
        self.history_window = turns;
        self
    }

    pub fn with_query_mode(mut self, mode: QueryMode) -> Self {
        self.query_mode = mode;
        self
    }
}
