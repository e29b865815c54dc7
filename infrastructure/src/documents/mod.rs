//! Document ingestion: cleaning, chunking and the per-category document folder

pub mod cleaner;
pub mod loader;
pub mod pdf;
pub mod splitter;

pub use cleaner::clean_text;
pub use loader::{DocumentError, DocumentLoader, LoadedDocument, PDF_EXTENSIONS, TEXT_EXTENSIONS};
pub use pdf::extract_pdf_text;
pub use splitter::RecursiveSplitter;
