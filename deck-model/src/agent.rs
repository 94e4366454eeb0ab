//! A named agent: fixed instructions in front of a model.

use crate::error::{ModelError, Result};
use crate::llm::Llm;
use crate::types::{LlmRequest, Message, ResponseSchema};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// An LLM persona with a system prompt.
///
/// Each call is a fresh two-message conversation (instructions + prompt);
/// no history is carried between calls.
#[derive(Clone)]
pub struct ChatAgent {
    name: String,
    instructions: String,
    model: Arc<dyn Llm>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl ChatAgent {
    pub fn new(name: impl Into<String>, instructions: impl Into<String>, model: Arc<dyn Llm>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            model,
            temperature: None,
            max_tokens: None,
        }
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    fn request(&self, prompt: &str) -> LlmRequest {
        let mut request =
            LlmRequest::new(vec![Message::system(&self.instructions), Message::user(prompt)]);
        request.temperature = self.temperature;
        request.max_tokens = self.max_tokens;
        request
    }

    /// Reply decoded into `T` using a schema derived from `T`.
    ///
    /// Returns `Ok(None)` when the model answered without content (blank
    /// reply or refusal) and an error when the content does not decode.
    pub async fn run_structured<T>(&self, prompt: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned + JsonSchema,
    {
        let request = self.request(prompt).with_response_schema(ResponseSchema::of::<T>());
        let response = self.model.generate(request).await?;

        let Some(text) = response.content_text() else {
            if let Some(refusal) = &response.refusal {
                tracing::warn!(agent = %self.name, refusal = %refusal, "model refused structured reply");
            }
            return Ok(None);
        };

        serde_json::from_str(text).map(Some).map_err(|e| {
            ModelError::StructuredOutput(format!("{} returned malformed JSON: {e}", self.name))
        })
    }
}

impl std::fmt::Debug for ChatAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatAgent")
            .field("name", &self.name)
            .field("model", &self.model.name())
            .finish()
    }
}
