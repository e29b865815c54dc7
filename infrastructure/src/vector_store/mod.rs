//! Per-category vector indexes on local disk
//!
//! Implements IndexStore (write side) and RetrievalService (read side).

pub mod error;
pub mod file_store;
pub mod index;
mod math;
pub mod retrieval;

pub use error::IndexStoreError;
pub use file_store::FileIndexStore;
pub use index::VectorIndex;
pub use retrieval::LocalRetrievalService;
