//! Application-level configuration.
//!
//! - [`PipelineParams`]: how much history reaches the answerer and how the
//!   retrieval query is built

pub mod pipeline_params;

pub use pipeline_params::PipelineParams;
