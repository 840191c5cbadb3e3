use std::sync::Arc;

use crate::application::ports::LlmClient;
use crate::application::services::DocumentProcessingService;
use crate::presentation::config::Settings;

pub struct AppState<L>
where
    L: LlmClient + ?Sized,
{
    pub processing_service: Arc<DocumentProcessingService<L>>,
    pub settings: Arc<Settings>,
}

impl<L> AppState<L>
where
    L: LlmClient + ?Sized,
{
    pub fn new(processing_service: Arc<DocumentProcessingService<L>>, settings: Settings) -> Self {
        Self {
            processing_service,
            settings: Arc::new(settings),
        }
    }
}

impl<L> Clone for AppState<L>
where
    L: LlmClient + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            processing_service: Arc::clone(&self.processing_service),
            settings: Arc::clone(&self.settings),
        }
    }
}
