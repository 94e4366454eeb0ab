//! Sequential execution engine for graphs
//!
//! Runs one node at a time. The state is borrowed mutably for the whole run
//! so every node observes the previous node's changes directly.

use crate::edge::EdgeTarget;
use crate::error::{GraphError, Result};
use crate::graph::CompiledGraph;
use crate::node::{ExecutionConfig, NodeContext};
use crate::stream::StreamEvent;
use std::time::Instant;

/// Outcome of a completed run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of node executions
    pub steps: usize,
    /// Node names in execution order
    pub visited: Vec<String>,
}

/// Executor for a single graph run
pub struct GraphExecutor<'a, S> {
    graph: &'a CompiledGraph<S>,
    config: ExecutionConfig,
    step: usize,
}

impl<'a, S: Send + 'static> GraphExecutor<'a, S> {
    /// Create a new executor
    pub fn new(graph: &'a CompiledGraph<S>, config: ExecutionConfig) -> Self {
        Self { graph, config, step: 0 }
    }

    /// Run the graph until a node routes to END or the recursion limit trips
    pub async fn run<O>(&mut self, state: &mut S, observer: O) -> Result<RunSummary>
    where
        O: Fn(StreamEvent) + Send + Sync,
    {
        let mut visited = Vec::new();
        let mut current = Some(self.graph.entry.clone());

        while let Some(name) = current.take() {
            if self.step >= self.config.recursion_limit {
                tracing::warn!(
                    run_id = %self.config.run_id,
                    step = self.step,
                    "recursion limit reached, aborting run"
                );
                observer(StreamEvent::RecursionLimit { step: self.step });
                return Err(GraphError::RecursionLimitExceeded(self.step));
            }

            let node = self.graph.node(&name)?.clone();
            let ctx = NodeContext::new(self.config.clone(), self.step);

            observer(StreamEvent::node_start(&name, self.step));
            let start = Instant::now();

            if let Err(e) = node.execute(state, &ctx).await {
                observer(StreamEvent::error(&e.to_string(), Some(name.as_str())));
                return Err(match e {
                    e @ GraphError::NodeExecutionFailed { .. } => e,
                    other => GraphError::node_failed(&name, other.to_string()),
                });
            }

            let duration_ms = start.elapsed().as_millis() as u64;
            tracing::debug!(run_id = %self.config.run_id, node = %name, step = self.step, duration_ms, "node completed");
            observer(StreamEvent::node_end(&name, self.step, duration_ms));

            self.step += 1;
            current = match self.graph.next_target(&name, state)? {
                EdgeTarget::Node(next) => Some(next),
                EdgeTarget::End => None,
            };
            visited.push(name);
        }

        observer(StreamEvent::done(self.step));
        Ok(RunSummary { steps: self.step, visited })
    }
}

#[cfg(test)]
mod tests {
    use crate::edge::{END, START};
    use crate::error::GraphError;
    use crate::graph::StateGraph;
    use crate::node::ExecutionConfig;

    #[derive(Default)]
    struct Counter {
        count: i64,
        log: Vec<String>,
    }

    #[tokio::test]
    async fn test_simple_execution() {
        let graph = StateGraph::<Counter>::new()
            .add_node_fn("set_value", |state, _ctx| {
                Box::pin(async move {
                    state.count = 42;
                    Ok(())
                })
            })
            .add_edge(START, "set_value")
            .add_edge("set_value", END)
            .compile()
            .unwrap();

        let mut state = Counter::default();
        let summary = graph.invoke(&mut state, ExecutionConfig::new("test")).await.unwrap();

        assert_eq!(state.count, 42);
        assert_eq!(summary.steps, 1);
    }

    #[tokio::test]
    async fn test_sequential_execution() {
        let graph = StateGraph::<Counter>::new()
            .add_node_fn("step1", |state, _ctx| {
                Box::pin(async move {
                    state.count = 1;
                    Ok(())
                })
            })
            .add_node_fn("step2", |state, ctx| {
                Box::pin(async move {
                    state.count += 10;
                    state.log.push(format!("step2@{}", ctx.step));
                    Ok(())
                })
            })
            .add_edge(START, "step1")
            .add_edge("step1", "step2")
            .add_edge("step2", END)
            .compile()
            .unwrap();

        let mut state = Counter::default();
        let summary = graph.invoke(&mut state, ExecutionConfig::new("test")).await.unwrap();

        assert_eq!(state.count, 11);
        assert_eq!(state.log, vec!["step2@1"]);
        assert_eq!(summary.visited, vec!["step1", "step2"]);
    }

    #[tokio::test]
    async fn test_recursion_limit() {
        let graph = StateGraph::<Counter>::new()
            .add_node_fn("loop", |state, _ctx| {
                Box::pin(async move {
                    state.count += 1;
                    Ok(())
                })
            })
            .add_edge(START, "loop")
            .add_edge("loop", "loop")
            .compile()
            .unwrap();

        let mut state = Counter::default();
        let result =
            graph.invoke(&mut state, ExecutionConfig::new("test").with_recursion_limit(10)).await;

        assert!(
            matches!(result, Err(GraphError::RecursionLimitExceeded(10))),
            "Expected RecursionLimitExceeded error, got: {:?}",
            result
        );
        // partial progress stays visible to the caller
        assert_eq!(state.count, 10);
    }

    #[tokio::test]
    async fn test_node_failure_is_wrapped() {
        let graph = StateGraph::<Counter>::new()
            .add_node_fn("explode", |_state, _ctx| {
                Box::pin(async move { Err(GraphError::InvalidGraph("bad input".into())) })
            })
            .add_edge(START, "explode")
            .compile()
            .unwrap();

        let mut state = Counter::default();
        let err = graph.invoke(&mut state, ExecutionConfig::default()).await.unwrap_err();

        match err {
            GraphError::NodeExecutionFailed { node, message } => {
                assert_eq!(node, "explode");
                assert!(message.contains("bad input"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
