//! CLI entrypoint for docqa
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use docqa_application::{
    AnswerQuestionUseCase, BuildIndexError, BuildIndexUseCase, ClassifyDepartmentUseCase,
    ConversationLogger, IndexStore, NoConversationLogger, NoProgress, PipelineParams,
    RunConversationUseCase,
};
use docqa_domain::{Category, ConversationState, DocumentChunk};
use docqa_infrastructure::{
    ConfigLoader, DocumentLoader, FileConfig, FileIndexStore, FileOutputFormat,
    JsonlConversationLogger, LocalRetrievalService, OllamaClient, RecursiveSplitter,
};
use docqa_presentation::{
    ChatRepl, Cli, Command, ConsoleFormatter, OutputConfig, OutputFormat, ProgressReporter,
    ReplConfig,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };
    config.validate().context("invalid configuration")?;

    let _log_guard = init_tracing(cli.verbose, config.logging.log_dir.as_deref());

    info!("Starting docqa");

    let output = OutputConfig {
        format: cli.output.unwrap_or(match config.output.format {
            FileOutputFormat::Text => OutputFormat::Text,
            FileOutputFormat::Json => OutputFormat::Json,
        }),
        color: config.output.color,
    };
    output.apply_color();

    // === Dependency Injection ===
    let app = App::new(config)?;

    match cli.command() {
        Command::Ask { question } => app.ask(&question.join(" "), output, cli.quiet).await,
        Command::Chat => {
            let repl_config = ReplConfig {
                show_progress: app.config.repl.show_progress && !cli.quiet,
                history_file: app.config.repl.history_file.clone(),
            };
            let mut repl = ChatRepl::new(app.conversation_use_case())
                .with_index_store(app.index_store.clone())
                .with_output_config(output)
                .with_repl_config(repl_config);
            repl.run().await?;
            Ok(())
        }
        Command::Ingest { category, files } => app.ingest(category, &files, output).await,
        Command::Status => app.status(output).await,
    }
}

/// Initialize logging based on verbosity level.
///
/// `RUST_LOG` applies when no `-v` is given. With a log directory, a
/// daily-rolling plain-text log is written alongside stderr.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter).with(stderr_layer);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "docqa.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}

/// Adapters shared by every command
struct App {
    config: FileConfig,
    ollama: Arc<OllamaClient>,
    index_store: Arc<FileIndexStore>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl App {
    fn new(config: FileConfig) -> Result<Self> {
        let ollama = Arc::new(OllamaClient::from_config(&config.ollama)?);
        let index_store = Arc::new(FileIndexStore::new(&config.storage.vector_dir));

        let conversation_logger: Arc<dyn ConversationLogger> = match &config.logging.conversation_log
        {
            Some(path) => match JsonlConversationLogger::new(path) {
                Some(logger) => {
                    info!("Conversation transcript: {}", logger.path().display());
                    Arc::new(logger)
                }
                None => Arc::new(NoConversationLogger),
            },
            None => Arc::new(NoConversationLogger),
        };

        info!(
            "Ollama {} (llm: {}, embed: {}), indexes in {}",
            ollama.base_url(),
            ollama.llm_model(),
            ollama.embed_model(),
            index_store.root().display()
        );

        Ok(Self {
            config,
            ollama,
            index_store,
            conversation_logger,
        })
    }

    fn conversation_use_case(&self) -> RunConversationUseCase {
        let retrieval = Arc::new(LocalRetrievalService::new(
            self.index_store.clone(),
            self.ollama.clone(),
            self.config.retrieval.top_k,
        ));
        let classifier = ClassifyDepartmentUseCase::new(self.ollama.clone());
        let answerer = AnswerQuestionUseCase::new(retrieval, self.ollama.clone());

        RunConversationUseCase::new(classifier, answerer)
            .with_params(
                PipelineParams::default()
                    .with_history_window(self.config.retrieval.history_window)
                    .with_query_mode(self.config.retrieval.query_mode),
            )
            .with_conversation_logger(self.conversation_logger.clone())
    }

    async fn ask(&self, question: &str, output: OutputConfig, quiet: bool) -> Result<()> {
        let use_case = self.conversation_use_case();
        let state = ConversationState::new();

        let result = if quiet {
            use_case.execute_with_progress(question, &state, &NoProgress).await?
        } else {
            let progress = ProgressReporter::new();
            use_case
                .execute_with_progress(question, &state, &progress)
                .await?
        };

        println!("{}", ConsoleFormatter::format_turn(&result, output.format));
        Ok(())
    }

    async fn ingest(&self, category: Category, files: &[PathBuf], output: OutputConfig) -> Result<()> {
        let loader = DocumentLoader::new(
            &self.config.storage.document_dir,
            RecursiveSplitter::new(self.config.ingest.chunk_size, self.config.ingest.chunk_overlap),
        );

        let mut chunks: Vec<DocumentChunk> = Vec::new();
        let mut loaded = 0;
        for path in files {
            match loader.ingest_file(category, path).await {
                Ok(doc) if doc.chunks.is_empty() => {
                    warn!("{} contains no text after cleaning; skipped", path.display());
                }
                Ok(doc) => {
                    loaded += 1;
                    chunks.extend(doc.chunks);
                }
                Err(e) => eprintln!("Skipping {}: {}", path.display(), e),
            }
        }

        let use_case = BuildIndexUseCase::new(self.ollama.clone(), self.index_store.clone())
            .with_batch_size(self.config.ingest.batch_size)
            .with_conversation_logger(self.conversation_logger.clone());

        match use_case.execute(category, chunks).await {
            Ok(result) => {
                println!("{}", ConsoleFormatter::format_ingest(&result, loaded, output.format));
                Ok(())
            }
            Err(BuildIndexError::NoContent) => {
                bail!("no text found in the given files; the {} index was not changed", category)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn status(&self, output: OutputConfig) -> Result<()> {
        let mut rows = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            rows.push((category, self.index_store.stats(category).await?));
        }
        println!("{}", ConsoleFormatter::format_status(&rows, output.format));
        Ok(())
    }
}
