use std::sync::Arc;

use serde_json::Value;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{DocumentTexts, ExtractedRecord, ExtractionOutcome, ShipmentFields};

use super::prompts::{EXTRACTION_SYSTEM_PROMPT, build_extraction_prompt};

pub struct FieldExtractionService<L>
where
    L: LlmClient + ?Sized,
{
    llm_client: Arc<L>,
}

impl<L> FieldExtractionService<L>
where
    L: LlmClient + ?Sized,
{
    pub fn new(llm_client: Arc<L>) -> Self {
        Self { llm_client }
    }

    /// Asks the model for the shipment fields. A malformed reply yields the
    /// fallback record; a failed model call or an empty reply is an error.
    #[tracing::instrument(
        skip(self, documents),
        fields(document_count = documents.document_count())
    )]
    pub async fn extract(
        &self,
        documents: &DocumentTexts,
    ) -> Result<ExtractedRecord, FieldExtractionError> {
        let prompt = build_extraction_prompt(&documents.flatten());

        tracing::debug!(prompt_chars = prompt.len(), "Requesting field extraction");

        let reply = self
            .llm_client
            .complete(EXTRACTION_SYSTEM_PROMPT, &prompt)
            .await
            .map_err(FieldExtractionError::Completion)?;

        if reply.trim().is_empty() {
            tracing::warn!("Model returned an empty reply");
            return Err(FieldExtractionError::EmptyReply);
        }

        let outcome = interpret_reply(&reply);
        if outcome.is_parsed() {
            tracing::info!("Model reply parsed into shipment fields");
        } else {
            tracing::warn!(
                reply_chars = reply.len(),
                "Model reply was not a JSON object, returning fallback record"
            );
        }

        Ok(outcome.into_record())
    }
}

/// Parses a model reply into shipment fields.
pub fn interpret_reply(reply: &str) -> ExtractionOutcome {
    match parse_reply(reply) {
        Ok(fields) => ExtractionOutcome::Parsed(fields),
        Err(e) => {
            tracing::debug!(error = %e, "Discarding unparseable model reply");
            ExtractionOutcome::Unparsed {
                raw_response: reply.to_string(),
            }
        }
    }
}

fn parse_reply(reply: &str) -> Result<ShipmentFields, ModelResponseParseError> {
    let value: Value = serde_json::from_str(reply.trim())
        .map_err(|e| ModelResponseParseError::InvalidJson(e.to_string()))?;

    match value {
        Value::Object(object) => Ok(ShipmentFields::from_json_object(&object)),
        _ => Err(ModelResponseParseError::NotAnObject),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelResponseParseError {
    #[error("reply is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("reply is not a JSON object")]
    NotAnObject,
}

#[derive(Debug, thiserror::Error)]
pub enum FieldExtractionError {
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
    #[error("model returned an empty reply")]
    EmptyReply,
}
