pub mod report;
pub mod templates;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unreadable document: {0}")]
    Unreadable(String),

    #[error("document contains no text")]
    Empty,

    #[error("extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Turns an uploaded document into plain text.
#[async_trait]
pub trait DocumentTextExtractor: Send + Sync {
    async fn extract(&self, document: Bytes) -> Result<String, ExtractError>;
}

/// PDF text extraction via `pdf-extract`, run off the async workers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

#[async_trait]
impl DocumentTextExtractor for PdfTextExtractor {
    async fn extract(&self, document: Bytes) -> Result<String, ExtractError> {
        let size = document.len();
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&document)
                .map_err(|e| ExtractError::Unreadable(e.to_string()))
        })
        .await??;

        if text.trim().is_empty() {
            return Err(ExtractError::Empty);
        }
        debug!(bytes = size, chars = text.len(), "pdf text extracted");
        Ok(text)
    }
}
