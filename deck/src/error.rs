//! Error types for the deck slideshow builder.

use crate::config::ValidationError;
use thiserror::Error;

/// Result type alias for deck operations.
pub type Result<T> = std::result::Result<T, DeckError>;

/// Errors that can occur while building a slideshow.
///
/// Per-slide failures (empty searches, malformed agent replies, judge
/// errors) are recovered inside the workflow and reported as events; only
/// the failures below escape to the caller.
#[derive(Debug, Error)]
pub enum DeckError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Configuration validation error with detailed context
    #[error("Configuration validation error: {0}")]
    ConfigValidation(#[from] ValidationError),

    /// The planner could not produce an outline
    #[error("Planning failed: {0}")]
    Planning(String),

    /// Model/LLM error
    #[error("Model error ({agent}): {message}")]
    Model { agent: String, message: String },

    /// NASA image search error
    #[error("Image search error: {0}")]
    Search(String),

    /// Workflow graph error
    #[error("Workflow error: {0}")]
    Workflow(#[from] deck_graph::GraphError),

    /// File I/O error
    #[error("File error ({path}): {message}")]
    File { path: String, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DeckError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        DeckError::Configuration(msg.into())
    }

    /// Create a model error.
    pub fn model(agent: impl Into<String>, msg: impl Into<String>) -> Self {
        DeckError::Model { agent: agent.into(), message: msg.into() }
    }

    /// Create a file error.
    pub fn file(path: impl Into<String>, msg: impl Into<String>) -> Self {
        DeckError::File { path: path.into(), message: msg.into() }
    }
}

impl From<std::io::Error> for DeckError {
    fn from(err: std::io::Error) -> Self {
        DeckError::File { path: "unknown".to_string(), message: err.to_string() }
    }
}

impl From<serde_json::Error> for DeckError {
    fn from(err: serde_json::Error) -> Self {
        DeckError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for DeckError {
    fn from(err: reqwest::Error) -> Self {
        DeckError::Search(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DeckError::config("missing endpoint");
        assert!(err.to_string().contains("Configuration error"));

        let err = DeckError::model("PlannerAgent", "no outline");
        assert_eq!(err.to_string(), "Model error (PlannerAgent): no outline");

        let err = DeckError::Planning("empty reply".into());
        assert!(err.to_string().starts_with("Planning failed"));
    }

    #[test]
    fn test_error_conversions() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(DeckError::from(io), DeckError::File { .. }));

        let json = serde_json::from_str::<u32>("x").unwrap_err();
        assert!(matches!(DeckError::from(json), DeckError::Serialization(_)));

        let graph = deck_graph::GraphError::RecursionLimitExceeded(3);
        assert!(matches!(DeckError::from(graph), DeckError::Workflow(_)));
    }
}
