//! Node types for graph execution
//!
//! Nodes are the computational units in a graph. Each node receives the
//! workflow state by exclusive reference and mutates it in place.

use crate::error::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;

/// Configuration for one graph run
#[derive(Clone, Debug)]
pub struct ExecutionConfig {
    /// Identifier used in logs and lifecycle events
    pub run_id: String,
    /// Maximum number of node executions before the run is aborted
    pub recursion_limit: usize,
}

impl ExecutionConfig {
    /// Create a new config with the given run ID
    pub fn new(run_id: &str) -> Self {
        Self { run_id: run_id.to_string(), recursion_limit: 50 }
    }

    /// Set the recursion limit
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::new(&uuid::Uuid::new_v4().to_string())
    }
}

/// Context passed to nodes during execution
#[derive(Clone, Debug)]
pub struct NodeContext {
    /// Configuration for this execution
    pub config: ExecutionConfig,
    /// Current step number (0-based)
    pub step: usize,
}

impl NodeContext {
    /// Create a new node context
    pub fn new(config: ExecutionConfig, step: usize) -> Self {
        Self { config, step }
    }
}

/// A node in the graph
#[async_trait]
pub trait Node<S: Send>: Send + Sync {
    /// Node identifier
    fn name(&self) -> &str;

    /// Execute the node against the shared state
    async fn execute(&self, state: &mut S, ctx: &NodeContext) -> Result<()>;
}

/// Signature of closures wrapped by [`FunctionNode`]
pub type AsyncNodeFn<S> =
    Box<dyn for<'a> Fn(&'a mut S, NodeContext) -> BoxFuture<'a, Result<()>> + Send + Sync>;

/// Function node - wraps an async closure as a node
pub struct FunctionNode<S> {
    name: String,
    func: AsyncNodeFn<S>,
}

impl<S> FunctionNode<S> {
    /// Create a new function node
    pub fn new<F>(name: &str, func: F) -> Self
    where
        F: for<'a> Fn(&'a mut S, NodeContext) -> BoxFuture<'a, Result<()>> + Send + Sync + 'static,
    {
        Self { name: name.to_string(), func: Box::new(func) }
    }
}

#[async_trait]
impl<S: Send> Node<S> for FunctionNode<S> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, state: &mut S, ctx: &NodeContext) -> Result<()> {
        (self.func)(state, ctx.clone()).await
    }
}
