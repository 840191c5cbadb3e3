use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{FormSubmissionError, FormSubmitter};
use crate::presentation::config::FormSettings;

use super::http_form_submitter::HttpFormSubmitter;
use super::stub_form_submitter::StubFormSubmitter;

pub struct FormSubmitterFactory;

impl FormSubmitterFactory {
    /// `None` when form submission is switched off. Without a URL the stub
    /// is used.
    pub fn create(
        settings: &FormSettings,
    ) -> Result<Option<Arc<dyn FormSubmitter>>, FormSubmissionError> {
        if !settings.enabled {
            return Ok(None);
        }

        match settings.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => {
                tracing::info!(url, "Form submission enabled");
                let submitter =
                    HttpFormSubmitter::new(url, Duration::from_secs(settings.timeout_secs))?;
                Ok(Some(Arc::new(submitter)))
            }
            None => {
                tracing::info!("Form submission enabled without a URL, using stub submitter");
                Ok(Some(Arc::new(StubFormSubmitter)))
            }
        }
    }
}
