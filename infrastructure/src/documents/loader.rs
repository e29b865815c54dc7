//! Document intake: store a copy under the category folder, then chunk it.
//!
//! Plain text files are read as UTF-8; PDFs go through text extraction.

use super::cleaner::clean_text;
use super::pdf::extract_pdf_text;
use super::splitter::RecursiveSplitter;
use docqa_domain::{Category, DocumentChunk};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// File extensions read as plain text
pub const TEXT_EXTENSIONS: [&str; 3] = ["txt", "md", "markdown"];

/// File extensions whose text layer is extracted
pub const PDF_EXTENSIONS: [&str; 1] = ["pdf"];

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported document {0} (expected .pdf, .txt or .md)")]
    Unsupported(PathBuf),

    #[error("Could not read PDF {path}: {message}")]
    Pdf { path: PathBuf, message: String },
}

/// A document copied into the store and split into chunks
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub source: String,
    pub stored_at: PathBuf,
    pub chunks: Vec<DocumentChunk>,
}

pub struct DocumentLoader {
    document_dir: PathBuf,
    splitter: RecursiveSplitter,
}

impl DocumentLoader {
    pub fn new(document_dir: impl Into<PathBuf>, splitter: RecursiveSplitter) -> Self {
        Self {
            document_dir: document_dir.into(),
            splitter,
        }
    }

    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.document_dir.join(category.path_segment())
    }

    pub fn is_supported(path: &Path) -> bool {
        has_extension(path, &TEXT_EXTENSIONS) || has_extension(path, &PDF_EXTENSIONS)
    }

    /// Copy `path` into the category folder and chunk its cleaned text.
    ///
    /// A file that is already inside the category folder is not copied.
    pub async fn ingest_file(&self, category: Category, path: &Path) -> Result<LoadedDocument, DocumentError> {
        let file_name = match path.file_name() {
            Some(name) if Self::is_supported(path) => name.to_os_string(),
            _ => return Err(DocumentError::Unsupported(path.to_path_buf())),
        };

        let dir = self.category_dir(category);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| DocumentError::Io {
                path: dir.clone(),
                source: e,
            })?;

        let stored_at = dir.join(&file_name);
        if !same_file(path, &stored_at).await {
            tokio::fs::copy(path, &stored_at)
                .await
                .map_err(|e| DocumentError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            debug!("Copied {} to {}", path.display(), stored_at.display());
        }

        let text = if has_extension(&stored_at, &PDF_EXTENSIONS) {
            read_pdf(&stored_at).await?
        } else {
            tokio::fs::read_to_string(&stored_at)
                .await
                .map_err(|e| DocumentError::Io {
                    path: stored_at.clone(),
                    source: e,
                })?
        };

        let source = file_name.to_string_lossy().into_owned();
        let chunks = self.chunk(&source, &text);
        info!("{}: {} chunks", source, chunks.len());

        Ok(LoadedDocument {
            source,
            stored_at,
            chunks,
        })
    }

    /// Clean and split `text` into chunks attributed to `source`.
    pub fn chunk(&self, source: &str, text: &str) -> Vec<DocumentChunk> {
        self.splitter
            .split(&clean_text(text))
            .into_iter()
            .enumerate()
            .map(|(i, content)| DocumentChunk::new(source, i, content))
            .collect()
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|s| s.eq_ignore_ascii_case(ext)))
}

async fn read_pdf(path: &Path) -> Result<String, DocumentError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| DocumentError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let pdf_error = |message: String| DocumentError::Pdf {
        path: path.to_path_buf(),
        message,
    };
    tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
        .await
        .map_err(|e| pdf_error(e.to_string()))?
        .map_err(|e| pdf_error(e.to_string()))
}

async fn same_file(a: &Path, b: &Path) -> bool {
    match (
        tokio::fs::canonicalize(a).await,
        tokio::fs::canonicalize(b).await,
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
