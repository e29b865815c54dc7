//! Progress notification port
//!
//! Defines the interface for reporting progress while a conversation turn
//! moves through the pipeline.

use docqa_domain::{Category, PipelineStage};

/// Callback for progress updates during a conversation turn
///
/// Implementations live in the presentation layer (spinner, plain text, ...).
pub trait PipelineProgress: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: PipelineStage);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: PipelineStage);

    /// Called once the department is known
    fn on_category_resolved(&self, _category: Category) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl PipelineProgress for NoProgress {
    fn on_stage_start(&self, _stage: PipelineStage) {}
    fn on_stage_complete(&self, _stage: PipelineStage) {}
}
