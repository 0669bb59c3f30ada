//! File Text Extractor: uploaded document bytes in, plain text out.
//!
//! Dispatch is by lowercased file-name extension. Converters are blocking and run on
//! the blocking pool so the upload handler stays a single awaited call.

pub mod docx;
pub mod pdf;

use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type. Please upload a PDF, DOC, or DOCX file.")]
    UnsupportedFileType,

    #[error("File parsing library is not loaded.")]
    MissingDependency,

    #[error("{0}")]
    Failed(String),
}

/// Accepted upload kinds. `.doc` and `.docx` share the word-processing converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    WordProcessing,
}

impl FileKind {
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractionError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .ok_or(ExtractionError::UnsupportedFileType)?;
        match extension.as_str() {
            "pdf" => Ok(FileKind::Pdf),
            "doc" | "docx" => Ok(FileKind::WordProcessing),
            _ => Err(ExtractionError::UnsupportedFileType),
        }
    }
}

/// A bytes-in, text-out document converter.
pub trait DocumentConverter: Send + Sync {
    fn convert(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

#[derive(Clone)]
pub struct FileTextExtractor {
    pdf: Arc<dyn DocumentConverter>,
    word: Option<Arc<dyn DocumentConverter>>,
}

impl FileTextExtractor {
    pub fn new(pdf: Arc<dyn DocumentConverter>, word: Option<Arc<dyn DocumentConverter>>) -> Self {
        Self { pdf, word }
    }

    /// The shipped converters. The DOCX converter is only installed when enabled.
    pub fn with_defaults(enable_docx: bool) -> Self {
        let word: Option<Arc<dyn DocumentConverter>> = if enable_docx {
            Some(Arc::new(docx::DocxTextConverter))
        } else {
            None
        };
        Self::new(Arc::new(pdf::PdfPageTextConverter), word)
    }

    pub async fn extract(&self, file_name: &str, bytes: Bytes) -> Result<String, ExtractionError> {
        let kind = FileKind::from_file_name(file_name)?;
        let converter = match kind {
            FileKind::Pdf => self.pdf.clone(),
            FileKind::WordProcessing => self
                .word
                .clone()
                .ok_or(ExtractionError::MissingDependency)?,
        };

        let size = bytes.len();
        let text = tokio::task::spawn_blocking(move || converter.convert(&bytes))
            .await
            .map_err(|e| {
                warn!("Extraction task for {file_name} did not complete: {e}");
                ExtractionError::Failed("An error occurred while reading the file.".to_string())
            })??;

        info!(
            "Extracted {} chars from {file_name} ({kind:?}, {size} bytes)",
            text.len()
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingConverter {
        calls: AtomicUsize,
    }

    impl DocumentConverter for CountingConverter {
        fn convert(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(String::from_utf8_lossy(bytes).into_owned())
        }
    }

    struct BrokenConverter;

    impl DocumentConverter for BrokenConverter {
        fn convert(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
            Err(ExtractionError::Failed("Corrupt archive".to_string()))
        }
    }

    #[test]
    fn test_file_kind_dispatch() {
        assert_eq!(FileKind::from_file_name("cv.pdf"), Ok(FileKind::Pdf));
        assert_eq!(FileKind::from_file_name("CV.PDF"), Ok(FileKind::Pdf));
        assert_eq!(FileKind::from_file_name("cv.final.Docx"), Ok(FileKind::WordProcessing));
        assert_eq!(FileKind::from_file_name("cv.doc"), Ok(FileKind::WordProcessing));
        assert_eq!(
            FileKind::from_file_name("resume.txt"),
            Err(ExtractionError::UnsupportedFileType)
        );
        assert_eq!(
            FileKind::from_file_name("resume"),
            Err(ExtractionError::UnsupportedFileType)
        );
    }

    #[tokio::test]
    async fn test_unsupported_type_never_reaches_a_converter() {
        let pdf = Arc::new(CountingConverter::default());
        let word = Arc::new(CountingConverter::default());
        let extractor = FileTextExtractor::new(pdf.clone(), Some(word.clone()));

        let err = extractor
            .extract("resume.txt", Bytes::from_static(b"plain"))
            .await
            .unwrap_err();

        assert_eq!(err, ExtractionError::UnsupportedFileType);
        assert_eq!(pdf.calls.load(Ordering::SeqCst), 0);
        assert_eq!(word.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_word_converter() {
        let extractor = FileTextExtractor::new(Arc::new(CountingConverter::default()), None);
        let err = extractor
            .extract("resume.docx", Bytes::from_static(b"PK"))
            .await
            .unwrap_err();
        assert_eq!(err, ExtractionError::MissingDependency);
    }

    #[tokio::test]
    async fn test_dispatches_by_extension() {
        let pdf = Arc::new(CountingConverter::default());
        let word = Arc::new(CountingConverter::default());
        let extractor = FileTextExtractor::new(pdf.clone(), Some(word.clone()));

        let text = extractor
            .extract("Resume.DOCX", Bytes::from_static(b"hello"))
            .await
            .unwrap();

        assert_eq!(text, "hello");
        assert_eq!(pdf.calls.load(Ordering::SeqCst), 0);
        assert_eq!(word.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_converter_failure_carries_message() {
        let extractor = FileTextExtractor::new(Arc::new(BrokenConverter), None);
        let err = extractor
            .extract("cv.pdf", Bytes::from_static(b"%PDF"))
            .await
            .unwrap_err();
        assert_eq!(err, ExtractionError::Failed("Corrupt archive".to_string()));
    }
}
