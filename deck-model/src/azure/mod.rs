//! Azure OpenAI chat completions, reached directly or through an API
//! Management gateway.

mod client;
mod config;
pub(crate) mod convert;

pub use client::AzureOpenAiClient;
pub use config::{AzureOpenAiConfig, DEFAULT_API_VERSION, DEFAULT_DEPLOYMENT};
