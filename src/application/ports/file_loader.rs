use async_trait::async_trait;

use crate::domain::Document;

/// Byte extractor: turns uploaded document bytes into raw text.
///
/// Implementations dispatch on [`Document::content_type`] and reject types
/// they do not handle with [`FileLoaderError::UnsupportedContentType`]. A
/// document with no text layer yields `Ok("")`, not an error; deciding that
/// there is nothing to analyze happens after normalization.
#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("extraction timed out after {seconds}s")]
    TimedOut { seconds: u64 },
}

/// Name used at the service boundary for byte-extraction failures.
pub type ExtractionError = FileLoaderError;
