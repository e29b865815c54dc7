//! Domain layer for docqa
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Category
//!
//! Every question is routed to exactly one department [`Category`]. The
//! category selects both the keyword set used for fast-path routing and the
//! retrieval index the answer is grounded in.
//!
//! ## Conversation
//!
//! - **Turn**: one question/answer exchange ([`ConversationTurn`])
//! - **State**: the caller-owned, ordered history of turns ([`ConversationState`])
//!
//! ## Pipeline
//!
//! A turn runs through a strictly linear [`PipelineStage`] sequence:
//! `Start -> Classify -> Answer -> Done`.

pub mod category;
pub mod conversation;
pub mod core;
pub mod document;
pub mod pipeline;
pub mod prompt;
pub mod retrieval;
pub mod util;

// Re-export commonly used types
pub use category::{
    Category, KeywordRouter, KeywordSet, parsing::parse_classification_response,
};
pub use conversation::{
    entities::{ConversationState, ConversationTurn},
    query::{QueryRequest, QueryResult},
};
pub use core::{error::DomainError, question::Question};
pub use document::DocumentChunk;
pub use pipeline::PipelineStage;
pub use prompt::PromptTemplate;
pub use retrieval::{Passage, QueryMode};
