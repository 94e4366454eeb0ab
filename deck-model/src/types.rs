//! Request and response types shared by every backend

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::strict_schema_for;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// JSON schema the reply must conform to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseSchema {
    /// Schema name sent to the provider (`[A-Za-z0-9_-]`)
    pub name: String,
    pub schema: Value,
}

impl ResponseSchema {
    /// Derive a strict schema from a Rust type
    pub fn of<T: JsonSchema>() -> Self {
        let name: String = T::schema_name()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        Self { name, schema: strict_schema_for::<T>() }
    }
}

/// A chat-completions request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    pub response_schema: Option<ResponseSchema>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages, ..Default::default() }
    }

    /// Ask the provider for JSON matching `schema`
    #[must_use]
    pub fn with_response_schema(mut self, schema: ResponseSchema) -> Self {
        self.response_schema = Some(schema);
        self
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

    /// Content of the last user message, if any
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages.iter().rev().find(|m| m.role == Role::User).map(|m| m.content.as_str())
    }
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A chat-completions reply
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LlmResponse {
    pub content: Option<String>,
    /// Set when the model declined to answer in the requested format
    pub refusal: Option<String>,
    pub finish_reason: Option<String>,
    pub usage: Option<Usage>,
}

impl LlmResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()), finish_reason: Some("stop".into()), ..Default::default() }
    }

    /// Non-blank reply text
    pub fn content_text(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.trim().is_empty())
    }
}
