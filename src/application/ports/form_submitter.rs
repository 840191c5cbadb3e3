use async_trait::async_trait;

use crate::domain::ExtractedRecord;

/// Forwards an extracted record to an external form. `Ok(false)` means the
/// form endpoint answered but did not accept the record.
#[async_trait]
pub trait FormSubmitter: Send + Sync {
    async fn submit(&self, record: &ExtractedRecord) -> Result<bool, FormSubmissionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FormSubmissionError {
    #[error("form endpoint unreachable: {0}")]
    Transport(String),
    #[error("form submission timed out")]
    TimedOut,
}
