//! # deck-model
//!
//! Chat-completions access for deck agents.
//!
//! - [`Llm`]: the backend trait, one request in, one reply out
//! - [`azure::AzureOpenAiClient`]: Azure OpenAI / API Management client with retries
//! - [`ChatAgent`]: instructions plus a model, with schema-checked structured replies
//! - [`MockLlm`]: scripted backend for tests

pub mod agent;
pub mod azure;
pub mod error;
pub mod llm;
pub mod mock;
pub mod retry;
pub mod schema;
pub mod types;

pub use agent::ChatAgent;
pub use azure::{AzureOpenAiClient, AzureOpenAiConfig};
pub use error::{ModelError, Result};
pub use llm::Llm;
pub use mock::{MockLlm, MockReply};
pub use retry::RetryConfig;
pub use types::{LlmRequest, LlmResponse, Message, ResponseSchema, Role, Usage};
