//! Azure OpenAI client implementation.

use super::config::AzureOpenAiConfig;
use super::convert;
use crate::error::{ModelError, Result};
use crate::llm::Llm;
use crate::retry::{RetryConfig, execute_with_retry, is_retryable_model_error};
use crate::types::{LlmRequest, LlmResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Chat completions client for an Azure OpenAI deployment.
///
/// Transient failures (429, 5xx, timeouts) are retried with exponential
/// backoff according to the configured [`RetryConfig`].
pub struct AzureOpenAiClient {
    client: Client,
    config: AzureOpenAiConfig,
    retry_config: RetryConfig,
}

impl AzureOpenAiClient {
    /// Create a new client from the given config.
    pub fn new(config: AzureOpenAiConfig) -> Result<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(ModelError::Config("endpoint must not be empty".to_string()));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| ModelError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config, retry_config: RetryConfig::default() })
    }

    /// Set the retry configuration, consuming and returning `self` for builder chaining.
    #[must_use]
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }

    async fn send_once(&self, url: &str, body: &Value) -> Result<Value> {
        let resp = self
            .client
            .post(url)
            .header("api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                ModelError::Model(format!(
                    "Azure OpenAI error for deployment={}: {e}",
                    self.config.deployment
                ))
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ModelError::Http { status, body });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| ModelError::Model(format!("invalid response body: {e}")))
    }
}

#[async_trait]
impl Llm for AzureOpenAiClient {
    fn name(&self) -> &str {
        &self.config.deployment
    }

    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse> {
        let url = self.config.chat_completions_url();
        let body = convert::build_request_body(&request);

        tracing::debug!(
            deployment = %self.config.deployment,
            messages = request.messages.len(),
            structured = request.response_schema.is_some(),
            "sending chat completion"
        );

        let json = execute_with_retry(&self.retry_config, is_retryable_model_error, || {
            self.send_once(&url, &body)
        })
        .await?;

        let response = convert::parse_response(&json)?;
        if let Some(usage) = response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion finished"
            );
        }
        Ok(response)
    }
}
