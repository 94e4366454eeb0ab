//! Error types for deck-graph

use thiserror::Error;

/// Result type for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur while building or running a graph
#[derive(Error, Debug)]
pub enum GraphError {
    /// Graph structure is invalid
    #[error("Invalid graph structure: {0}")]
    InvalidGraph(String),

    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// A node with the same name was registered twice
    #[error("Duplicate node: {0}")]
    DuplicateNode(String),

    /// Edge target not found
    #[error("Edge target not found: {0}")]
    EdgeTargetNotFound(String),

    /// No entry point defined
    #[error("No entry point defined (missing edge from START)")]
    NoEntryPoint,

    /// Iteration ceiling reached before the graph ended
    #[error("Recursion limit exceeded: {0} steps")]
    RecursionLimitExceeded(usize),

    /// Node execution failed
    #[error("Node '{node}' execution failed: {message}")]
    NodeExecutionFailed { node: String, message: String },

    /// Router produced a key with no mapped target
    #[error("Router returned unknown target: {0}")]
    UnknownRouteTarget(String),
}

impl GraphError {
    /// Shorthand for a failed node
    pub fn node_failed(node: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NodeExecutionFailed { node: node.into(), message: message.into() }
    }
}
