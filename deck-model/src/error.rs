//! Error types for deck-model

use thiserror::Error;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while talking to a chat-completions backend
#[derive(Error, Debug)]
pub enum ModelError {
    /// Transport or provider failure
    #[error("Model error: {0}")]
    Model(String),

    /// Provider returned a non-success status
    #[error("Provider returned status {status}: {body}")]
    Http { status: u16, body: String },

    /// Client configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// The reply could not be decoded into the requested type
    #[error("Structured output error: {0}")]
    StructuredOutput(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl ModelError {
    /// Status code for HTTP failures
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
