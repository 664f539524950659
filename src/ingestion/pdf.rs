//! PDF text extraction
//!
//! One [`Document`] per page with extractable text. Pages are read with
//! lopdf; when lopdf finds no text anywhere, pdf-extract is tried on the
//! whole file and its output becomes a single page.

use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::{RagError, Result};
use crate::store::Document;

/// Reference document bundled with the binary
pub const BUILTIN_PDF: &[u8] = include_bytes!("../../resources/docs/reference.pdf");

/// File name recorded in metadata for the bundled document
pub const BUILTIN_PDF_NAME: &str = "reference.pdf";

const FALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

/// Reads a PDF into page documents
pub struct PdfReader;

impl PdfReader {
    /// Read the bundled reference document
    pub fn read_builtin() -> Result<Vec<Document>> {
        Self::read_bytes(BUILTIN_PDF_NAME, BUILTIN_PDF)
    }

    /// Read a PDF file from disk
    pub fn read_file(path: &Path) -> Result<Vec<Document>> {
        let data = std::fs::read(path).map_err(|e| {
            RagError::PdfError(format!("Cannot read {}: {}", path.display(), e))
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "document.pdf".to_string());

        Self::read_bytes(&file_name, &data)
    }

    /// Read a PDF held in memory
    pub fn read_bytes(file_name: &str, data: &[u8]) -> Result<Vec<Document>> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| RagError::PdfError(format!("Failed to load {}: {}", file_name, e)))?;

        let mut pages = Vec::new();
        for page_number in doc.get_pages().keys() {
            let text = match doc.extract_text(&[*page_number]) {
                Ok(text) => clean_text(&text),
                Err(e) => {
                    debug!(page_number, "No text on page: {}", e);
                    continue;
                }
            };

            if text.is_empty() {
                continue;
            }

            pages.push(page_document(file_name, *page_number, text));
        }

        if pages.is_empty() {
            warn!(file_name, "lopdf found no text, trying pdf-extract");
            match extract_with_timeout(data.to_vec(), FALLBACK_TIMEOUT) {
                Ok(text) => {
                    let text = clean_text(&text);
                    if !text.is_empty() {
                        pages.push(page_document(file_name, 1, text));
                    }
                }
                Err(cause) => {
                    warn!(file_name, "pdf-extract failed: {}", cause);
                    return Err(RagError::PdfError(format!(
                        "{} has no extractable text ({})",
                        file_name, cause
                    )));
                }
            }
        }

        if pages.is_empty() {
            return Err(RagError::PdfError(format!(
                "{} has no extractable text",
                file_name
            )));
        }

        debug!(file_name, pages = pages.len(), "Extracted PDF text");
        Ok(pages)
    }
}

/// Run pdf-extract on its own thread; it can panic or hang on unusual fonts
fn extract_with_timeout(data: Vec<u8>, timeout: Duration) -> std::result::Result<String, String> {
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        let result = pdf_extract::extract_text_from_mem(&data).map_err(|e| e.to_string());
        let _ = tx.send(result);
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => {
            let _ = handle.join();
            result
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            Err(format!("timed out after {}s", timeout.as_secs()))
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => Err("extraction thread panicked".to_string()),
    }
}

fn page_document(file_name: &str, page_number: u32, text: String) -> Document {
    Document::new(text)
        .with_metadata("file_name", file_name)
        .with_metadata("page_number", page_number)
}

/// Drop NUL bytes and blank lines, trim each line
fn clean_text(text: &str) -> String {
    text.replace('\0', "")
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        let raw = "  first line  \n\n\0second\n   \nthird ";
        assert_eq!(clean_text(raw), "first line\nsecond\nthird");
    }

    #[test]
    fn test_missing_file() {
        let result = PdfReader::read_file(Path::new("/nonexistent/reference.pdf"));
        assert!(matches!(result, Err(RagError::PdfError(_))));
    }

    #[test]
    fn test_not_a_pdf() {
        let result = PdfReader::read_bytes("notes.pdf", b"plain text, not a PDF");
        assert!(matches!(result, Err(RagError::PdfError(_))));
    }

    #[test]
    fn test_builtin_pdf_has_pages() {
        let pages = PdfReader::read_builtin().unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].metadata["file_name"], BUILTIN_PDF_NAME);
        assert!(pages.iter().any(|p| p.content.contains("HNSW")));
    }

    #[test]
    fn test_fallback_error_is_reported() {
        let result = extract_with_timeout(b"not a pdf at all".to_vec(), Duration::from_secs(10));
        assert!(matches!(result, Err(cause) if !cause.is_empty()));
    }

    #[test]
    fn test_page_document_metadata() {
        let doc = page_document("reference.pdf", 7, "body".to_string());
        assert_eq!(doc.page_number(), Some(7));
        assert_eq!(doc.metadata["file_name"], "reference.pdf");
    }
}
