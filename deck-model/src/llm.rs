use crate::error::Result;
use crate::types::{LlmRequest, LlmResponse};
use async_trait::async_trait;

/// A chat-completions backend
#[async_trait]
pub trait Llm: Send + Sync {
    fn name(&self) -> &str;
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse>;
}
