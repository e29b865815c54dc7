//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use docqa_domain::Category;
use std::path::PathBuf;

/// Output format for answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Department label followed by the answer
    Text,
    /// One JSON object per answer
    Json,
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse::<Category>().map_err(|e| e.to_string())
}

/// CLI arguments for docqa
#[derive(Parser, Debug)]
#[command(name = "docqa")]
#[command(author, version, about = "Internal document Q&A - department routing over local Ollama")]
#[command(long_about = r#"
docqa answers questions about internal documents with a locally hosted
language model (Ollama).

Each question is routed to a department (人事財務 / 資訊), by keyword or by
asking the model, and answered from that department's document index plus
the recent conversation.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./docqa.toml        Project-level config
3. ~/.config/docqa/config.toml   Global config
4. DOCQA_* environment variables (e.g. DOCQA_OLLAMA__LLM_MODEL)

Example:
  docqa ingest --category hr_finance 員工手冊.pdf
  docqa ask "請問加班費怎麼算？"
  docqa chat
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides config)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask a single question and exit
    Ask {
        /// The question (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Start an interactive chat session (default)
    Chat,

    /// Add documents to a department index
    Ingest {
        /// Department token: hr_finance or it
        #[arg(short, long, value_parser = parse_category)]
        category: Category,

        /// Documents to ingest (.pdf, .txt, .md)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show which department indexes exist
    Status,
}

impl Cli {
    /// The subcommand to run; no subcommand means chat.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat)
    }
}

impl Command {
    /// The question of an `ask` command as one string
    pub fn question(&self) -> Option<String> {
        match self {
            Command::Ask { question } => Some(question.join(" ")),
            _ => None,
        }
    }
}
