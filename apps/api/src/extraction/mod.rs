//! Document text extraction: turns an uploaded résumé into plain text.
//!
//! `AppState` holds an `Arc<dyn DocumentTextExtractor>`; production uses
//! `PdfTextExtractor`, tests swap in an in-memory fake.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::errors::AppError;

/// Content types accepted for résumé uploads.
pub const PDF_CONTENT_TYPES: &[&str] = &["application/pdf", "application/x-pdf"];

pub const EMPTY_DOCUMENT_MESSAGE: &str =
    "Could not extract text from PDF. The file may be empty or corrupted.";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("{0}")]
    Parse(String),

    #[error("PDF parser aborted: {0}")]
    Aborted(String),
}

#[async_trait]
pub trait DocumentTextExtractor: Send + Sync {
    async fn extract(&self, document: Bytes) -> Result<String, ExtractionError>;
}

/// Extracts text with `pdf-extract` on the blocking thread pool.
pub struct PdfTextExtractor;

#[async_trait]
impl DocumentTextExtractor for PdfTextExtractor {
    async fn extract(&self, document: Bytes) -> Result<String, ExtractionError> {
        // CPU bound; a parser panic surfaces as a JoinError.
        tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&document).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| ExtractionError::Aborted(e.to_string()))?
        .map_err(ExtractionError::Parse)
    }
}

/// Runs the extractor and classifies the outcome.
///
/// Whitespace-only output is `UnprocessableDocument` (422); parser failures are
/// `ExtractionFailed` (500) with the parser message preserved.
pub async fn extract_resume_text(
    extractor: &dyn DocumentTextExtractor,
    document: Bytes,
) -> Result<String, AppError> {
    let size = document.len();
    let text = extractor.extract(document).await.map_err(|e| {
        tracing::error!("Error processing PDF ({size} bytes): {e}");
        AppError::ExtractionFailed(format!("Failed to process PDF: {e}"))
    })?;

    if text.trim().is_empty() {
        tracing::warn!("PDF of {size} bytes produced no extractable text");
        return Err(AppError::UnprocessableDocument(
            EMPTY_DOCUMENT_MESSAGE.to_string(),
        ));
    }

    tracing::debug!("Extracted {} characters from PDF", text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedText(&'static str);

    #[async_trait]
    impl DocumentTextExtractor for FixedText {
        async fn extract(&self, _document: Bytes) -> Result<String, ExtractionError> {
            Ok(self.0.to_string())
        }
    }

    struct Broken;

    #[async_trait]
    impl DocumentTextExtractor for Broken {
        async fn extract(&self, _document: Bytes) -> Result<String, ExtractionError> {
            Err(ExtractionError::Parse("invalid xref table".to_string()))
        }
    }

    #[tokio::test]
    async fn test_text_is_returned_untouched() {
        let text = extract_resume_text(&FixedText("Experienced Python developer"), Bytes::new())
            .await
            .unwrap();
        assert_eq!(text, "Experienced Python developer");
    }

    #[tokio::test]
    async fn test_whitespace_only_is_unprocessable() {
        let err = extract_resume_text(&FixedText(" \n\t \x0c"), Bytes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableDocument(_)));
        assert_eq!(err.to_string(), EMPTY_DOCUMENT_MESSAGE);
    }

    #[tokio::test]
    async fn test_parser_failure_preserves_message() {
        let err = extract_resume_text(&Broken, Bytes::from_static(b"%PDF-1.4"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ExtractionFailed(_)));
        assert_eq!(err.to_string(), "Failed to process PDF: invalid xref table");
    }

    #[tokio::test]
    async fn test_pdf_extractor_rejects_garbage() {
        let result = PdfTextExtractor
            .extract(Bytes::from_static(b"definitely not a pdf"))
            .await;
        assert!(result.is_err());
    }
}
