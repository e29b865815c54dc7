//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::ProgressReporter;
use crate::config::{OutputConfig, ReplConfig};
use colored::Colorize;
use docqa_application::{ConversationError, IndexStore, NoProgress, RunConversationUseCase};
use docqa_domain::{Category, ConversationState};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::sync::Arc;
use tracing::warn;

const HISTORY_CAPACITY: usize = 1000;

/// Slash commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    History,
    Clear,
    Status,
    Quit,
    Unknown(String),
}

impl SlashCommand {
    /// Parse a line starting with `/`; other lines are questions.
    pub fn parse(line: &str) -> Option<Self> {
        let cmd = line.trim();
        if !cmd.starts_with('/') {
            return None;
        }
        let name = cmd.split_whitespace().next().unwrap_or(cmd);
        Some(match name {
            "/help" | "/h" | "/?" => SlashCommand::Help,
            "/history" => SlashCommand::History,
            "/clear" | "/reset" => SlashCommand::Clear,
            "/status" => SlashCommand::Status,
            "/quit" | "/exit" | "/q" => SlashCommand::Quit,
            other => SlashCommand::Unknown(other.to_string()),
        })
    }
}

/// Interactive chat REPL
///
/// Owns the session's [`ConversationState`]; each answered question is
/// appended through the conversation use case.
pub struct ChatRepl {
    use_case: RunConversationUseCase,
    index_store: Option<Arc<dyn IndexStore>>,
    state: ConversationState,
    output: OutputConfig,
    repl: ReplConfig,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(use_case: RunConversationUseCase) -> Self {
        Self {
            use_case,
            index_store: None,
            state: ConversationState::new(),
            output: OutputConfig::default(),
            repl: ReplConfig::default(),
        }
    }

    /// Enable `/status` by giving the REPL access to the indexes
    pub fn with_index_store(mut self, store: Arc<dyn IndexStore>) -> Self {
        self.index_store = Some(store);
        self
    }

    pub fn with_output_config(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn with_repl_config(mut self, repl: ReplConfig) -> Self {
        self.repl = repl;
        self
    }

    /// Current conversation
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    fn line_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = self.repl.history_path() else {
            return editor;
        };

        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Could not open history file {}: {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut line_editor = self.line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("docqa".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match line_editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    if let Some(command) = SlashCommand::parse(line) {
                        if self.handle_command(command).await {
                            break;
                        }
                        continue;
                    }

                    self.process_question(line).await;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                _ => {
                    println!("^C");
                    continue;
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        💬 企業內部問答系統 - Chat Mode        │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /history          - Show this conversation");
        println!("  /clear            - Forget this conversation");
        println!("  /status           - Show department indexes");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&mut self, command: SlashCommand) -> bool {
        match command {
            SlashCommand::Quit => {
                println!("Bye!");
                return true;
            }
            SlashCommand::Help => {
                println!();
                Self::print_help();
            }
            SlashCommand::History => {
                println!();
                println!("{}", ConsoleFormatter::format_history(&self.state));
                println!();
            }
            SlashCommand::Clear => {
                self.state = ConversationState::new();
                println!("Conversation cleared.");
            }
            SlashCommand::Status => self.print_status().await,
            SlashCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn print_status(&self) {
        let Some(store) = &self.index_store else {
            println!("Index status is not available in this session.");
            return;
        };

        let mut rows = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            match store.stats(category).await {
                Ok(stats) => rows.push((category, stats)),
                Err(e) => {
                    eprintln!("{} {}: {}", "Error:".red(), category, e);
                    return;
                }
            }
        }
        println!("{}", ConsoleFormatter::format_status(&rows, self.output.format));
        println!("{} {} turns in this conversation", "->".cyan(), self.state.len());
    }

    async fn process_question(&mut self, question: &str) {
        println!();

        let result = if self.repl.show_progress {
            let progress = ProgressReporter::new();
            self.use_case
                .execute_with_progress(question, &self.state, &progress)
                .await
        } else {
            self.use_case
                .execute_with_progress(question, &self.state, &NoProgress)
                .await
        };

        match result {
            Ok(output) => {
                println!("{}", ConsoleFormatter::format_turn(&output, self.output.format));
                self.state = output.state;
            }
            Err(ConversationError::ServiceUnavailable(e)) => {
                eprintln!("{} {}", "Service unavailable:".red().bold(), e);
                eprintln!("{}", "The question was not added to the conversation.".dimmed());
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
            }
        }
        println!();
    }
}
