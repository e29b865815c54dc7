//! Application layer for docqa
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.
//!
//! A conversation turn is handled by [`RunConversationUseCase`], which wires
//! [`ClassifyDepartmentUseCase`] into [`AnswerQuestionUseCase`]. Document
//! ingestion is handled separately by [`BuildIndexUseCase`].

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::PipelineParams;
pub use ports::{
    completion::CompletionService,
    conversation_logger::{
        ConversationEvent, ConversationLogger, NoConversationLogger, RoutingMethod,
    },
    embedding::EmbeddingService,
    error::ServiceError,
    index_store::{IndexEntry, IndexStats, IndexStore},
    progress::{NoProgress, PipelineProgress},
    retrieval::RetrievalService,
};
pub use use_cases::answer_question::{AnswerError, AnswerQuestionUseCase};
pub use use_cases::build_index::{BuildIndexError, BuildIndexOutput, BuildIndexUseCase};
pub use use_cases::classify_department::{Classification, ClassifyDepartmentUseCase};
pub use use_cases::run_conversation::{
    ConversationError, ConversationOutput, RunConversationUseCase,
};
