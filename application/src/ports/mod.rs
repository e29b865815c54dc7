//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.
//! The completion and retrieval services are opaque to the pipeline: it only
//! sees text in, text (or passages) out.

pub mod completion;
pub mod conversation_logger;
pub mod embedding;
pub mod error;
pub mod index_store;
pub mod progress;
pub mod retrieval;
