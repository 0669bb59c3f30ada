//! PDF page-text extraction via lopdf.

use lopdf::Document;

use super::{DocumentConverter, ExtractionError};

/// Reads every page in order. Text items on a page are joined with single spaces;
/// pages are joined with `\n`. A document without pages yields an empty string.
pub struct PdfPageTextConverter;

impl DocumentConverter for PdfPageTextConverter {
    fn convert(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| ExtractionError::Failed(format!("Failed to read PDF: {e}")))?;

        // BTreeMap keyed by 1-based page number, so iteration is page order.
        let pages = doc.get_pages();
        let mut page_texts = Vec::with_capacity(pages.len());
        for page_number in pages.keys() {
            let raw = doc.extract_text(&[*page_number]).map_err(|e| {
                ExtractionError::Failed(format!(
                    "Failed to extract text from page {page_number}: {e}"
                ))
            })?;
            page_texts.push(join_text_items(&raw));
        }
        Ok(page_texts.join("\n"))
    }
}

fn join_text_items(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
