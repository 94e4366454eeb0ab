//! StateGraph builder for constructing graphs

use crate::edge::{Edge, EdgeTarget, START, keyed_router};
use crate::error::{GraphError, Result};
use crate::executor::{GraphExecutor, RunSummary};
use crate::node::{ExecutionConfig, FunctionNode, Node, NodeContext};
use crate::stream::StreamEvent;
use futures::future::BoxFuture;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// Builder for constructing graphs over a state type `S`
pub struct StateGraph<S> {
    /// Registered nodes
    pub nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Registered edges
    pub edges: Vec<Edge<S>>,
    duplicates: Vec<String>,
}

impl<S: Send + 'static> Default for StateGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Send + 'static> StateGraph<S> {
    /// Create an empty graph
    pub fn new() -> Self {
        Self { nodes: HashMap::new(), edges: vec![], duplicates: vec![] }
    }

    /// Add a node to the graph
    pub fn add_node<N: Node<S> + 'static>(self, node: N) -> Self {
        self.add_node_arc(Arc::new(node))
    }

    /// Add a shared node to the graph
    pub fn add_node_arc(mut self, node: Arc<dyn Node<S>>) -> Self {
        let name = node.name().to_string();
        if self.nodes.insert(name.clone(), node).is_some() {
            self.duplicates.push(name);
        }
        self
    }

    /// Add an async closure as a node
    pub fn add_node_fn<F>(self, name: &str, func: F) -> Self
    where
        F: for<'a> Fn(&'a mut S, NodeContext) -> BoxFuture<'a, Result<()>> + Send + Sync + 'static,
    {
        self.add_node(FunctionNode::new(name, func))
    }

    /// Add a direct edge from source to target
    pub fn add_edge(mut self, source: &str, target: &str) -> Self {
        if source == START {
            self.edges.retain(|e| !matches!(e, Edge::Entry { .. }));
            self.edges.push(Edge::Entry { target: target.to_string() });
        } else {
            self.edges
                .push(Edge::Direct { source: source.to_string(), target: EdgeTarget::from(target) });
        }
        self
    }

    /// Add a conditional edge whose router returns a typed route key
    pub fn add_conditional_edges<'t, F, K, I>(mut self, source: &str, router: F, targets: I) -> Self
    where
        F: Fn(&S) -> K + Send + Sync + 'static,
        K: Eq + Hash + Debug + Send + Sync + 'static,
        I: IntoIterator<Item = (K, &'t str)>,
    {
        let routes: HashMap<K, EdgeTarget> =
            targets.into_iter().map(|(k, v)| (k, EdgeTarget::from(v))).collect();
        let declared = routes.values().cloned().collect();

        self.edges.push(Edge::Conditional {
            source: source.to_string(),
            router: keyed_router(router, routes),
            targets: declared,
        });
        self
    }

    /// Compile the graph for execution
    pub fn compile(self) -> Result<CompiledGraph<S>> {
        self.validate()?;

        let entry = self
            .edges
            .iter()
            .find_map(|e| match e {
                Edge::Entry { target } => Some(target.clone()),
                _ => None,
            })
            .ok_or(GraphError::NoEntryPoint)?;

        Ok(CompiledGraph { nodes: self.nodes, edges: self.edges, entry })
    }

    /// Validate the graph structure
    fn validate(&self) -> Result<()> {
        if let Some(name) = self.duplicates.first() {
            return Err(GraphError::DuplicateNode(name.clone()));
        }

        if !self.edges.iter().any(|e| matches!(e, Edge::Entry { .. })) {
            return Err(GraphError::NoEntryPoint);
        }

        let mut sources = HashSet::new();
        for edge in &self.edges {
            let check_target = |target: &EdgeTarget| match target {
                EdgeTarget::Node(name) if !self.nodes.contains_key(name) => {
                    Err(GraphError::EdgeTargetNotFound(name.clone()))
                }
                _ => Ok(()),
            };

            match edge {
                Edge::Direct { source, target } => {
                    if !self.nodes.contains_key(source) {
                        return Err(GraphError::NodeNotFound(source.clone()));
                    }
                    check_target(target)?;
                }
                Edge::Conditional { source, targets, .. } => {
                    if !self.nodes.contains_key(source) {
                        return Err(GraphError::NodeNotFound(source.clone()));
                    }
                    targets.iter().try_for_each(check_target)?;
                }
                Edge::Entry { target } => {
                    if !self.nodes.contains_key(target) {
                        return Err(GraphError::EdgeTargetNotFound(target.clone()));
                    }
                }
            }

            if !sources.insert(edge.source().to_string()) {
                return Err(GraphError::InvalidGraph(format!(
                    "node '{}' has more than one outgoing edge",
                    edge.source()
                )));
            }
        }

        Ok(())
    }
}

/// A compiled graph ready for execution
pub struct CompiledGraph<S> {
    pub(crate) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(crate) edges: Vec<Edge<S>>,
    pub(crate) entry: String,
}

impl<S: Send + 'static> CompiledGraph<S> {
    /// Name of the first node to run
    pub fn entry_node(&self) -> &str {
        &self.entry
    }

    /// Names of every registered node
    pub fn node_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub(crate) fn node(&self, name: &str) -> Result<&Arc<dyn Node<S>>> {
        self.nodes.get(name).ok_or_else(|| GraphError::NodeNotFound(name.to_string()))
    }

    /// Resolve where execution goes after `node`; no outgoing edge means END
    pub fn next_target(&self, node: &str, state: &S) -> Result<EdgeTarget> {
        let edge = self.edges.iter().find(|e| e.source() == node && node != START);
        match edge {
            Some(Edge::Direct { target, .. }) => Ok(target.clone()),
            Some(Edge::Conditional { router, .. }) => router(state),
            _ => Ok(EdgeTarget::End),
        }
    }

    /// Run the graph to completion, mutating `state` in place
    pub async fn invoke(&self, state: &mut S, config: ExecutionConfig) -> Result<RunSummary> {
        GraphExecutor::new(self, config).run(state, |_| {}).await
    }

    /// Run the graph, reporting lifecycle events to `observer`
    pub async fn invoke_observed<O>(
        &self,
        state: &mut S,
        config: ExecutionConfig,
        observer: O,
    ) -> Result<RunSummary>
    where
        O: Fn(StreamEvent) + Send + Sync,
    {
        GraphExecutor::new(self, config).run(state, observer).await
    }
}

impl<S> std::fmt::Debug for CompiledGraph<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledGraph")
            .field("entry", &self.entry)
            .field("nodes", &self.nodes.keys().collect::<Vec<_>>())
            .field("edges", &self.edges)
            .finish()
    }
}
