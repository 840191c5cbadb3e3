use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::{DocumentReadError, TextExtractor};
use crate::domain::{AggregatedDocuments, DocumentKind};

/// Dispatches staged files to the extractor registered for their kind.
pub struct DocumentAggregator {
    extractors: HashMap<DocumentKind, Arc<dyn TextExtractor>>,
    allowed_extensions: Option<HashSet<String>>,
}

impl DocumentAggregator {
    pub fn new(extractors: Vec<(DocumentKind, Arc<dyn TextExtractor>)>) -> Self {
        Self {
            extractors: extractors.into_iter().collect(),
            allowed_extensions: None,
        }
    }

    /// Restricts dispatch to the given extensions (`.pdf` or `pdf`, any case).
    pub fn with_allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_extensions = Some(
            extensions
                .into_iter()
                .map(|ext| normalize_extension(ext.as_ref()))
                .collect(),
        );
        self
    }

    fn classify(&self, path: &Path) -> Option<DocumentKind> {
        let extension = path.extension().and_then(|ext| ext.to_str())?;

        if let Some(allowed) = &self.allowed_extensions {
            if !allowed.contains(&normalize_extension(extension)) {
                return None;
            }
        }

        DocumentKind::from_extension(extension).filter(|kind| self.extractors.contains_key(kind))
    }

    /// Extracts every recognised file in order. Unrecognised files are
    /// reported back in `skipped`; the first extraction failure aborts.
    #[tracing::instrument(skip(self, paths), fields(file_count = paths.len()))]
    pub async fn aggregate(
        &self,
        paths: &[PathBuf],
    ) -> Result<AggregatedDocuments, DocumentReadError> {
        let mut aggregated = AggregatedDocuments::default();

        for path in paths {
            let Some((kind, extractor)) = self
                .classify(path)
                .and_then(|kind| self.extractors.get(&kind).map(|e| (kind, e)))
            else {
                tracing::debug!(path = %path.display(), "No extractor for file, skipping");
                aggregated.skipped.push(path.clone());
                continue;
            };

            let text = extractor.extract_text(path).await?;
            tracing::debug!(
                path = %path.display(),
                category = %kind,
                chars = text.len(),
                "Document text extracted"
            );
            aggregated.texts.push(kind, text);
        }

        Ok(aggregated)
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_ascii_lowercase()
}
