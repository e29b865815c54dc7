//! Conversation pipeline stages

use serde::{Deserialize, Serialize};

/// Stage of a conversation turn.
///
/// The sequence is strictly linear. Routing produces a category value that
/// selects an index; it never selects a different stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    Start,
    Classify,
    Answer,
    Done,
}

impl PipelineStage {
    /// The stage that follows this one, or `None` at `Done`.
    pub fn next(self) -> Option<Self> {
        match self {
            PipelineStage::Start => Some(PipelineStage::Classify),
            PipelineStage::Classify => Some(PipelineStage::Answer),
            PipelineStage::Answer => Some(PipelineStage::Done),
            PipelineStage::Done => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == PipelineStage::Done
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Start => "start",
            PipelineStage::Classify => "classify",
            PipelineStage::Answer => "answer",
            PipelineStage::Done => "done",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PipelineStage::Start => "Start",
            PipelineStage::Classify => "Department Routing",
            PipelineStage::Answer => "Retrieval & Answer",
            PipelineStage::Done => "Done",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
