//! Lifecycle events reported while a graph runs

use serde::Serialize;

/// Events emitted to an observer during execution
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Node started execution
    NodeStart { node: String, step: usize },

    /// Node completed execution
    NodeEnd { node: String, step: usize, duration_ms: u64 },

    /// The iteration ceiling stopped the run
    RecursionLimit { step: usize },

    /// Graph execution completed
    Done { total_steps: usize },

    /// Error occurred
    Error { message: String, node: Option<String> },
}

impl StreamEvent {
    /// Create a node start event
    pub fn node_start(node: &str, step: usize) -> Self {
        Self::NodeStart { node: node.to_string(), step }
    }

    /// Create a node end event
    pub fn node_end(node: &str, step: usize, duration_ms: u64) -> Self {
        Self::NodeEnd { node: node.to_string(), step, duration_ms }
    }

    /// Create a done event
    pub fn done(total_steps: usize) -> Self {
        Self::Done { total_steps }
    }

    /// Create an error event
    pub fn error(message: &str, node: Option<&str>) -> Self {
        Self::Error { message: message.to_string(), node: node.map(|s| s.to_string()) }
    }
}
