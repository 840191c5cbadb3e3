mod form_submitter;
mod llm_client;
mod text_extractor;

pub use form_submitter::{FormSubmissionError, FormSubmitter};
pub use llm_client::{LlmClient, LlmClientError};
pub use text_extractor::{DocumentReadError, TextExtractor};
