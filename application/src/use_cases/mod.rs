//! Use cases
//!
//! - [`classify_department`]: keyword fast path, model fallback
//! - [`answer_question`]: retrieval-augmented answering within a category
//! - [`run_conversation`]: one conversation turn through the pipeline
//! - [`build_index`]: embed document chunks into a category index

pub mod answer_question;
pub mod build_index;
pub mod classify_department;
pub mod run_conversation;

#[cfg(test)]
pub(crate) mod test_support;
