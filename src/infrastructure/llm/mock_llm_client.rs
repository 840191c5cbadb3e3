use std::sync::Mutex;

use crate::application::ports::{LlmClient, LlmClientError};

enum MockReply {
    Text(String),
    Failure(String),
}

/// In-process stand-in for the model. Replies with a canned text or a
/// canned transport failure and remembers every user prompt it saw.
pub struct MockLlmClient {
    reply: MockReply,
    prompts: Mutex<Vec<String>>,
}

impl MockLlmClient {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: MockReply::Text(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: MockReply::Failure(message.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|prompts| prompts.len()).unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, LlmClientError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(user_prompt.to_string());
        }

        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Failure(message) => Err(LlmClientError::ApiRequestFailed(message.clone())),
        }
    }
}
