//! Prompt templates for department routing and grounded answering.

pub mod template;

pub use template::PromptTemplate;
