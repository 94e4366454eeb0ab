//! Configuration types for Azure OpenAI deployments.

use serde::{Deserialize, Serialize};

pub const DEFAULT_DEPLOYMENT: &str = "gpt-4.1-mini";
pub const DEFAULT_API_VERSION: &str = "2024-10-21";

/// Connection settings for one deployment.
///
/// The `endpoint` is either the Azure OpenAI resource (`https://x.openai.azure.com/openai`)
/// or an API Management gateway that fronts it. Both authenticate with the
/// `api-key` header and route by deployment name.
///
/// # Example
///
/// ```rust,ignore
/// use deck_model::azure::AzureOpenAiConfig;
///
/// let config = AzureOpenAiConfig::new("https://gateway.azure-api.net/openai", "key")
///     .with_deployment("gpt-4.1-mini");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureOpenAiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
}

impl AzureOpenAiConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            deployment: DEFAULT_DEPLOYMENT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    #[must_use]
    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = deployment.into();
        self
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Chat completions URL for the configured deployment
    pub fn chat_completions_url(&self) -> String {
        format!(
            "{}/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}
