use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::application::ports::{DocumentReadError, FormSubmitter, LlmClient};
use crate::domain::{ExtractedRecord, PipelineStage, UploadedFile};

use super::document_aggregator::DocumentAggregator;
use super::field_extraction_service::{FieldExtractionError, FieldExtractionService};
use super::transient_storage::{TransientStorage, TransientStorageError};

const UNKNOWN_DOCUMENT: &str = "uploaded document";

/// What to do with uploads whose extension no extractor handles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnrecognizedPolicy {
    #[default]
    Skip,
    Reject,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessingOptions {
    pub unrecognized_policy: UnrecognizedPolicy,
    pub staging_root: Option<PathBuf>,
}

/// Runs one upload request: stage, extract, aggregate, model, optionally
/// submit. Staged files never outlive the call.
pub struct DocumentProcessingService<L>
where
    L: LlmClient + ?Sized,
{
    aggregator: Arc<DocumentAggregator>,
    field_extraction: Arc<FieldExtractionService<L>>,
    form_submitter: Option<Arc<dyn FormSubmitter>>,
    options: ProcessingOptions,
}

impl<L> DocumentProcessingService<L>
where
    L: LlmClient + ?Sized,
{
    pub fn new(
        aggregator: Arc<DocumentAggregator>,
        field_extraction: Arc<FieldExtractionService<L>>,
        form_submitter: Option<Arc<dyn FormSubmitter>>,
        options: ProcessingOptions,
    ) -> Self {
        Self {
            aggregator,
            field_extraction,
            form_submitter,
            options,
        }
    }

    #[tracing::instrument(skip(self, uploads), fields(file_count = uploads.len()))]
    pub async fn process(
        &self,
        uploads: Vec<UploadedFile>,
    ) -> Result<ExtractedRecord, ProcessingError> {
        if uploads.is_empty() {
            return Err(ProcessingError::NoFiles);
        }

        tracing::debug!(stage = %PipelineStage::Received, "Upload received");

        let mut storage = TransientStorage::create(self.options.staging_root.as_deref())?;
        let result = self.run(&mut storage, &uploads).await;

        if let Err(e) = storage.release() {
            tracing::warn!(error = %e, "Transient storage not fully released");
        }

        match &result {
            Ok(record) => tracing::info!(
                stage = %PipelineStage::Responded,
                fallback = record.is_fallback(),
                "Document processing complete"
            ),
            Err(e) => tracing::error!(
                stage = %PipelineStage::Failed,
                failed_after = %e.stage(),
                error = %e,
                "Document processing failed"
            ),
        }

        result
    }

    async fn run(
        &self,
        storage: &mut TransientStorage,
        uploads: &[UploadedFile],
    ) -> Result<ExtractedRecord, ProcessingError> {
        for upload in uploads {
            storage.stage(upload).await?;
        }
        tracing::debug!(
            stage = %PipelineStage::Staged,
            dir = %storage.path().display(),
            "Uploads staged"
        );

        let aggregated = self
            .aggregator
            .aggregate(storage.staged_paths())
            .await
            .map_err(|source| {
                tracing::error!(error = %source, "Document extraction failed");
                let filename = source
                    .path()
                    .and_then(|path| original_name(storage.staged_paths(), uploads, path))
                    .unwrap_or_else(|| UNKNOWN_DOCUMENT.to_string());
                ProcessingError::DocumentRead { filename, source }
            })?;
        tracing::debug!(
            stage = %PipelineStage::Extracted,
            extracted = aggregated.texts.document_count(),
            skipped = aggregated.skipped.len(),
            "Documents extracted"
        );

        if !aggregated.skipped.is_empty() {
            let filenames = original_names(storage.staged_paths(), uploads, &aggregated.skipped);
            match self.options.unrecognized_policy {
                UnrecognizedPolicy::Skip => {
                    tracing::warn!(?filenames, "Ignoring files with unsupported extensions");
                }
                UnrecognizedPolicy::Reject => {
                    return Err(ProcessingError::UnsupportedDocument { filenames });
                }
            }
        }

        for (category, texts) in aggregated.texts.iter() {
            tracing::debug!(
                stage = %PipelineStage::Aggregated,
                %category,
                documents = texts.len(),
                "Category aggregated"
            );
        }

        let record = self.field_extraction.extract(&aggregated.texts).await?;
        tracing::debug!(
            stage = %PipelineStage::Modeled,
            fallback = record.is_fallback(),
            "Fields extracted"
        );

        if let Some(submitter) = &self.form_submitter {
            match submitter.submit(&record).await {
                Ok(true) => tracing::info!("Extracted record submitted to form"),
                Ok(false) => tracing::warn!("Form endpoint rejected extracted record"),
                Err(e) => tracing::warn!(error = %e, "Form submission failed"),
            }
        }

        Ok(record)
    }
}

fn original_names(
    staged: &[PathBuf],
    uploads: &[UploadedFile],
    skipped: &[PathBuf],
) -> Vec<String> {
    skipped
        .iter()
        .filter_map(|path| original_name(staged, uploads, path))
        .collect()
}

/// Client-supplied filename of a staged file.
fn original_name(staged: &[PathBuf], uploads: &[UploadedFile], path: &Path) -> Option<String> {
    let index = staged.iter().position(|p| p == path)?;
    uploads.get(index).map(|upload| upload.filename.clone())
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("no files uploaded")]
    NoFiles,
    #[error("staging: {0}")]
    Staging(#[from] TransientStorageError),
    #[error("{filename} {}", source.summary())]
    DocumentRead {
        filename: String,
        #[source]
        source: DocumentReadError,
    },
    #[error("unsupported document type: {}", filenames.join(", "))]
    UnsupportedDocument { filenames: Vec<String> },
    #[error("field extraction: {0}")]
    FieldExtraction(#[from] FieldExtractionError),
}

impl ProcessingError {
    /// Last stage the request completed before failing.
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::NoFiles | Self::Staging(_) => PipelineStage::Received,
            Self::DocumentRead { .. } => PipelineStage::Staged,
            Self::UnsupportedDocument { .. } => PipelineStage::Extracted,
            Self::FieldExtraction(_) => PipelineStage::Aggregated,
        }
    }
}
