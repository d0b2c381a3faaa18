//! Text extraction from uploaded bytes

use crate::error::{CritiqueError, Result};
use crate::input::file_detector::FileKind;
use log::debug;

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed inputs
        let extracted = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
            .map_err(|_| {
                CritiqueError::UnreadableDocument("PDF parser aborted on malformed input".to_string())
            })?;

        let pages = extracted.map_err(|e| {
            CritiqueError::UnreadableDocument(format!("Failed to extract text from PDF: {}", e))
        })?;
        debug!("PDF has {} pages", pages.len());

        Ok(join_pages(&pages))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let content = std::str::from_utf8(bytes).map_err(|e| {
            CritiqueError::UnreadableDocument(format!("File is not valid UTF-8 text: {}", e))
        })?;
        Ok(content.to_string())
    }
}

/// Route bytes to the extractor matching the declared kind
pub fn extract_text(bytes: &[u8], kind: FileKind) -> Result<String> {
    match kind {
        FileKind::Pdf => {
            debug!("Extracting text from {} PDF bytes", bytes.len());
            PdfExtractor.extract(bytes)
        }
        FileKind::Text | FileKind::Other => {
            debug!("Decoding {} bytes as UTF-8 text", bytes.len());
            PlainTextExtractor.extract(bytes)
        }
    }
}

/// Keeps pages with extractable text, in order, trimmed, one newline after each.
fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|page| page.as_ref().trim())
        .filter(|page| !page.is_empty())
        .fold(String::new(), |mut text, page| {
            text.push_str(page);
            text.push('\n');
            text
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passthrough() {
        let text = extract_text("Jane Roe\nData Engineer".as_bytes(), FileKind::Text).unwrap();
        assert_eq!(text, "Jane Roe\nData Engineer");
    }

    #[test]
    fn test_unknown_kind_decodes_as_text() {
        let text = extract_text(b"plain words", FileKind::Other).unwrap();
        assert_eq!(text, "plain words");
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let result = extract_text(&[0xff, 0xfe, 0x00, 0xc3], FileKind::Text);
        assert!(matches!(result, Err(CritiqueError::UnreadableDocument(_))));
    }

    #[test]
    fn test_garbage_pdf_is_unreadable() {
        let result = extract_text(b"this is not a pdf at all", FileKind::Pdf);
        assert!(matches!(result, Err(CritiqueError::UnreadableDocument(_))));
    }

    const MULTI_PAGE_PDF: &[u8] = include_bytes!("../../tests/fixtures/multi_page_resume.pdf");

    #[test]
    fn test_pdf_pages_are_newline_separated() {
        let text = extract_text(MULTI_PAGE_PDF, FileKind::Pdf).unwrap();
        assert_eq!(text, "Jane Roe Senior Data\nEngineer building Spark pipelines\n");
    }

    #[test]
    fn test_join_pages_skips_blank_pages() {
        let pages = ["\n\nPage one text", "   \n ", "Page three text"];
        assert_eq!(join_pages(&pages), "Page one text\nPage three text\n");
        assert_eq!(join_pages(&["", "\n"]), "");
    }
}
