//! Export of the improved resume to a downloadable document.

pub mod font_metrics;
pub mod pdf;

use thiserror::Error;

/// File name offered to the browser for the export.
pub const EXPORT_FILE_NAME: &str = "Improved_Resume.pdf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF generation library is not loaded. Please try refreshing the page.")]
    Unavailable,

    #[error("There is no analysis result to export yet.")]
    NoResult,

    #[error("{0}")]
    Failed(String),
}

/// Text in, document bytes out.
pub trait ResumeExporter: Send + Sync {
    fn export(&self, text: &str) -> Result<Vec<u8>, ExportError>;
}
