//! Console output formatter for conversation turns

use crate::cli::commands::OutputFormat;
use colored::Colorize;
use docqa_application::{BuildIndexOutput, ConversationOutput, IndexStats, RoutingMethod};
use docqa_domain::{Category, ConversationState};
use serde_json::json;

/// Formats answers, history and index status for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one answered turn in the requested format
    pub fn format_turn(output: &ConversationOutput, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => Self::format_answer(output),
            OutputFormat::Json => Self::format_json(output),
        }
    }

    /// Department label followed by the answer
    pub fn format_answer(output: &ConversationOutput) -> String {
        let label = format!("📁 部門判斷：{}", output.category.display_name());
        let mut text = format!("{}", label.cyan().bold());
        if output.routing == RoutingMethod::Fallback {
            text.push_str(&format!(" {}", "(routing fallback)".dimmed()));
        }
        text.push_str("\n\n");
        text.push_str(&output.answer);
        text
    }

    /// Format as JSON
    pub fn format_json(output: &ConversationOutput) -> String {
        let question = output
            .state
            .history()
            .last()
            .map(|turn| turn.question())
            .unwrap_or_default();
        let value = json!({
            "question": question,
            "category": output.category,
            "department": output.category.display_name(),
            "routing": output.routing,
            "answer": output.answer,
            "turns": output.state.len(),
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the conversation so far
    pub fn format_history(state: &ConversationState) -> String {
        if state.is_empty() {
            return "(no conversation yet)".dimmed().to_string();
        }

        let mut output = String::new();
        for (i, turn) in state.history().iter().enumerate() {
            output.push_str(&format!(
                "{} {}\n",
                format!("[{}] User:", i + 1).bold(),
                turn.question()
            ));
            output.push_str(&format!(
                "{} {}\n\n",
                "    AI:".green().bold(),
                Self::indent(turn.answer(), "        ").trim_start()
            ));
        }
        output.trim_end().to_string()
    }

    /// Per-category index status
    pub fn format_status(rows: &[(Category, Option<IndexStats>)], format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => {
                let value: Vec<_> = rows
                    .iter()
                    .map(|(category, stats)| {
                        json!({
                            "category": category,
                            "department": category.display_name(),
                            "built": stats.is_some(),
                            "chunks": stats.as_ref().map(|s| s.entries).unwrap_or(0),
                            "sources": stats.as_ref().map(|s| s.sources).unwrap_or(0),
                        })
                    })
                    .collect();
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Text => {
                let mut output = Self::section_header("Department indexes");
                for (category, stats) in rows {
                    let name = format!("{} ({})", category.display_name(), category);
                    let line = match stats {
                        Some(stats) => format!(
                            "  {} {:<24} {} chunks from {} files\n",
                            "v".green(),
                            name,
                            stats.entries,
                            stats.sources
                        ),
                        None => format!(
                            "  {} {:<24} {}\n",
                            "x".red(),
                            name,
                            "not built".dimmed()
                        ),
                    };
                    output.push_str(&line);
                }
                output
            }
        }
    }

    /// Result of an ingest run
    pub fn format_ingest(result: &BuildIndexOutput, files: usize, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => {
                let value = json!({
                    "category": result.category,
                    "files": files,
                    "added": result.added,
                    "total": result.total,
                });
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Text => format!(
                "{} {} chunks from {} files added to {} ({} chunks total)",
                "v".green(),
                result.added,
                files,
                result.category.display_name().bold(),
                result.total
            ),
        }
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
