use std::path::{Path, PathBuf};

use async_trait::async_trait;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, path: &Path) -> Result<String, DocumentReadError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentReadError {
    #[error("failed to open {}: {reason}", path.display())]
    Open { path: PathBuf, reason: String },
    #[error("failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
    #[error("extraction of {} timed out", path.display())]
    TimedOut { path: PathBuf },
    #[error("extraction task failed: {0}")]
    TaskFailed(String),
}

impl DocumentReadError {
    /// Staged file the error refers to, when known.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Open { path, .. } | Self::Parse { path, .. } | Self::TimedOut { path } => {
                Some(path)
            }
            Self::TaskFailed(_) => None,
        }
    }

    /// What went wrong, without any filesystem detail.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Open { .. } => "could not be opened",
            Self::Parse { .. } => "could not be parsed",
            Self::TimedOut { .. } => "took too long to extract",
            Self::TaskFailed(_) => "could not be processed",
        }
    }
}
