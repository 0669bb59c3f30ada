//! Raw-text extraction from word-processing documents via docx-rs.

use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild, TableCellContent, TableChild,
    TableRowChild,
};

use super::{DocumentConverter, ExtractionError};

/// Paragraph text in document order, one blank line between paragraphs.
/// Table cells contribute their paragraphs in row-major order.
pub struct DocxTextConverter;

impl DocumentConverter for DocxTextConverter {
    fn convert(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let docx = read_docx(bytes)
            .map_err(|e| ExtractionError::Failed(format!("Failed to read document: {e}")))?;

        let mut paragraphs = Vec::new();
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => paragraphs.push(paragraph_text(p)),
                DocumentChild::Table(table) => {
                    for row in &table.rows {
                        #[allow(irrefutable_let_patterns)]
                        let TableChild::TableRow(row) = row else { continue };
                        for cell in &row.cells {
                            #[allow(irrefutable_let_patterns)]
                            let TableRowChild::TableCell(cell) = cell else { continue };
                            for content in &cell.children {
                                if let TableCellContent::Paragraph(p) = content {
                                    paragraphs.push(paragraph_text(p));
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(paragraphs.join("\n\n"))
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&paragraph.children, &mut text);
    text
}

fn push_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_children(&link.children, out),
            _ => {}
        }
    }
}
