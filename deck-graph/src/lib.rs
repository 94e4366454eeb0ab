//! # deck-graph
//!
//! Typed-state workflow graphs for agent pipelines.
//!
//! ## Overview
//!
//! A [`StateGraph`] is a set of named nodes joined by direct or conditional
//! edges. Unlike a key/value channel graph, the state is a plain Rust value
//! owned by the caller and handed to each node as `&mut S`, so nodes can
//! keep strongly typed fields (enums, sets, histories) without any
//! serialization in between.
//!
//! Conditional edges route on a typed key returned by a router closure,
//! usually a small enum, and the executor enforces a recursion limit as a
//! hard ceiling on the number of node executions.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use deck_graph::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Step { Again, Stop }
//!
//! struct Counter { n: u32 }
//!
//! let graph = StateGraph::<Counter>::new()
//!     .add_node_fn("tick", |state, _ctx| Box::pin(async move {
//!         state.n += 1;
//!         Ok(())
//!     }))
//!     .add_edge(START, "tick")
//!     .add_conditional_edges(
//!         "tick",
//!         |state: &Counter| if state.n < 3 { Step::Again } else { Step::Stop },
//!         [(Step::Again, "tick"), (Step::Stop, END)],
//!     )
//!     .compile()?;
//!
//! let mut state = Counter { n: 0 };
//! graph.invoke(&mut state, ExecutionConfig::new("run-1")).await?;
//! ```

pub mod edge;
pub mod error;
pub mod executor;
pub mod graph;
pub mod node;
pub mod stream;

// Re-exports
pub use edge::{END, Edge, EdgeTarget, RouterFn, START};
pub use error::{GraphError, Result};
pub use executor::{GraphExecutor, RunSummary};
pub use graph::{CompiledGraph, StateGraph};
pub use node::{ExecutionConfig, FunctionNode, Node, NodeContext};
pub use stream::StreamEvent;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::edge::{END, EdgeTarget, START};
    pub use crate::error::{GraphError, Result};
    pub use crate::executor::RunSummary;
    pub use crate::graph::{CompiledGraph, StateGraph};
    pub use crate::node::{ExecutionConfig, Node, NodeContext};
    pub use crate::stream::StreamEvent;
    pub use async_trait::async_trait;
}
