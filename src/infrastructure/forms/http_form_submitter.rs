use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{FormSubmissionError, FormSubmitter};
use crate::domain::ExtractedRecord;

/// Posts the record as JSON to a form endpoint, bounded by a request timeout.
pub struct HttpFormSubmitter {
    client: Client,
    url: String,
}

impl HttpFormSubmitter {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, FormSubmissionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FormSubmissionError::Transport(format!("client build: {e}")))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl FormSubmitter for HttpFormSubmitter {
    #[tracing::instrument(skip(self, record), fields(url = %self.url))]
    async fn submit(&self, record: &ExtractedRecord) -> Result<bool, FormSubmissionError> {
        let response = self
            .client
            .post(&self.url)
            .json(record)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FormSubmissionError::TimedOut
                } else {
                    FormSubmissionError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "Form endpoint did not accept the record");
            return Ok(false);
        }

        Ok(true)
    }
}
