//! PDF text extraction
//!
//! Text is pulled page by page. Pages whose content cannot be decoded are
//! skipped with a warning, so one broken page does not lose the document.
//! Scanned PDFs without a text layer yield empty text.

use lopdf::Document;
use tracing::warn;

/// Extract the text layer of a PDF, pages separated by blank lines.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, lopdf::Error> {
    let document = Document::load_mem(bytes)?;

    let mut pages = Vec::new();
    for page in document.get_pages().into_keys() {
        match document.extract_text(&[page]) {
            Ok(text) => pages.push(text),
            Err(e) => warn!("Skipping unreadable PDF page {}: {}", page, e),
        }
    }
    Ok(pages.join("\n\n"))
}
