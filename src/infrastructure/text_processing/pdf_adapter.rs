use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{DocumentReadError, TextExtractor};

pub const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Text-layer extraction for PDFs. No OCR: image-only pages give no text.
#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(path: &Path) -> Result<Vec<String>, DocumentReadError> {
        let mut doc = PdfDocument::open(path).map_err(|e| DocumentReadError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let page_count = doc.page_count().map_err(|e| DocumentReadError::Parse {
            path: path.to_path_buf(),
            reason: format!("failed to read page count: {e}"),
        })?;

        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            let text = doc
                .extract_text(page_index)
                .map_err(|e| DocumentReadError::Parse {
                    path: path.to_path_buf(),
                    reason: format!("page {}: {e}", page_index + 1),
                })?;
            pages.push(text);
        }

        Ok(pages)
    }
}

#[async_trait]
impl TextExtractor for PdfAdapter {
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    async fn extract_text(&self, path: &Path) -> Result<String, DocumentReadError> {
        let owned: PathBuf = path.to_path_buf();

        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_pages(&owned)),
        )
        .await
        .map_err(|_| DocumentReadError::TimedOut {
            path: path.to_path_buf(),
        })?
        .map_err(|e| DocumentReadError::TaskFailed(e.to_string()))??;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");

        Ok(pages.join("\n"))
    }
}
