use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::domain::UploadedFile;

const STAGING_PREFIX: &str = "lading-";

/// Request-scoped staging directory. Everything staged here is removed when
/// the value is released or dropped, whichever comes first.
pub struct TransientStorage {
    dir: TempDir,
    staged: Vec<PathBuf>,
}

impl TransientStorage {
    pub fn create(root: Option<&Path>) -> Result<Self, TransientStorageError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_PREFIX);

        let dir = match root {
            Some(root) => {
                std::fs::create_dir_all(root).map_err(TransientStorageError::Create)?;
                builder.tempdir_in(root)
            }
            None => builder.tempdir(),
        }
        .map_err(TransientStorageError::Create)?;

        Ok(Self {
            dir,
            staged: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn staged_paths(&self) -> &[PathBuf] {
        &self.staged
    }

    /// Writes one upload under a name that keeps its original extension.
    pub async fn stage(&mut self, file: &UploadedFile) -> Result<PathBuf, TransientStorageError> {
        let name = format!("{:03}-{}", self.staged.len(), file.safe_filename());
        let path = self.dir.path().join(name);

        tokio::fs::write(&path, &file.content)
            .await
            .map_err(|source| TransientStorageError::Write {
                filename: file.filename.clone(),
                source,
            })?;

        tracing::debug!(
            filename = %file.filename,
            bytes = file.size_bytes(),
            staged_as = %path.display(),
            "Upload staged"
        );

        self.staged.push(path.clone());
        Ok(path)
    }

    /// Removes the staging directory and reports any failure to do so.
    pub fn release(self) -> Result<(), TransientStorageError> {
        let file_count = self.staged.len();
        self.dir.close().map_err(TransientStorageError::Release)?;
        tracing::debug!(file_count, "Transient storage released");
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransientStorageError {
    #[error("failed to create staging directory: {0}")]
    Create(#[source] io::Error),
    #[error("failed to stage {filename}: {source}")]
    Write {
        filename: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to release staging directory: {0}")]
    Release(#[source] io::Error),
}
