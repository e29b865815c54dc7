//! Progress reporting for conversation turns

use colored::Colorize;
use docqa_application::PipelineProgress;
use docqa_domain::{Category, PipelineStage};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner shown while a turn runs
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn stage_message(stage: PipelineStage) -> &'static str {
        match stage {
            PipelineStage::Classify => "判斷部門中...",
            PipelineStage::Answer => "AI 思考中...",
            PipelineStage::Start | PipelineStage::Done => "",
        }
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.spinner.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineProgress for ProgressReporter {
    fn on_stage_start(&self, stage: PipelineStage) {
        if stage.is_terminal() {
            if let Ok(mut guard) = self.spinner.lock()
                && let Some(pb) = guard.take()
            {
                pb.finish_and_clear();
            }
            return;
        }

        if let Ok(mut guard) = self.spinner.lock() {
            let pb = guard.get_or_insert_with(|| {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::spinner_style());
                pb.enable_steady_tick(Duration::from_millis(100));
                pb
            });
            pb.set_prefix(stage.display_name());
            pb.set_message(Self::stage_message(stage));
        }
    }

    fn on_stage_complete(&self, _stage: PipelineStage) {}

    fn on_category_resolved(&self, category: Category) {
        self.with_spinner(|pb| {
            pb.println(format!(
                "{} {}",
                "->".cyan(),
                format!("部門：{}", category.display_name()).bold()
            ));
        });
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        // A failed turn never reaches Done; clear the spinner anyway
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl PipelineProgress for SimpleProgress {
    fn on_stage_start(&self, stage: PipelineStage) {
        if !stage.is_terminal() {
            eprintln!("{} {}", "->".cyan(), stage.display_name().bold());
        }
    }

    fn on_stage_complete(&self, stage: PipelineStage) {
        eprintln!("  {} {}", "v".green(), stage.display_name());
    }

    fn on_category_resolved(&self, category: Category) {
        eprintln!("  {} {}", "=".cyan(), category.display_name());
    }
}
