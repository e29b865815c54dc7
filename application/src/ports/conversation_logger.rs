//! Port for structured conversation logging.
//!
//! Separate from `tracing`: tracing carries human-readable diagnostics, while
//! this port records the conversation transcript as machine-readable events.

use docqa_domain::Category;
use serde::Serialize;

/// How a question's department was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingMethod {
    /// A keyword from one of the department sets matched
    Keyword,
    /// The completion service answered the routing prompt
    Model,
    /// The completion service failed; the default department was used
    Fallback,
}

/// A transcript event.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEvent<'a> {
    Classification {
        question: &'a str,
        category: Category,
        method: RoutingMethod,
    },
    Answer {
        question: &'a str,
        category: Category,
        answer: &'a str,
        index_missing: bool,
    },
    IndexBuilt {
        category: Category,
        added: usize,
        total: usize,
    },
}

/// Port for logging conversation events.
///
/// `log` is synchronous and infallible; a failing transcript must not
/// interrupt a turn.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: &ConversationEvent<'_>);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: &ConversationEvent<'_>) {}
}
