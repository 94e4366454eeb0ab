//! Edge types for graph control flow
//!
//! Every node owns at most one outgoing edge declaration: either a direct
//! edge or a conditional edge whose router inspects the state.

use crate::error::{GraphError, Result};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// Special node identifiers
pub const START: &str = "__start__";
pub const END: &str = "__end__";

/// Target of an edge
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EdgeTarget {
    /// Specific node
    Node(String),
    /// End of graph
    End,
}

impl EdgeTarget {
    /// Check if this is the END target
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    /// Get the node name if this is a Node target
    pub fn node_name(&self) -> Option<&str> {
        match self {
            Self::Node(name) => Some(name),
            Self::End => None,
        }
    }
}

impl From<&str> for EdgeTarget {
    fn from(s: &str) -> Self {
        if s == END { Self::End } else { Self::Node(s.to_string()) }
    }
}

/// Type-erased router: maps the current state to the next target
pub type RouterFn<S> = Arc<dyn Fn(&S) -> Result<EdgeTarget> + Send + Sync>;

/// Build a [`RouterFn`] from a typed route-key function and its target table.
///
/// The key type is usually a small enum, so routing never compares strings.
pub fn keyed_router<S, K, F>(router: F, routes: HashMap<K, EdgeTarget>) -> RouterFn<S>
where
    S: 'static,
    K: Eq + Hash + Debug + Send + Sync + 'static,
    F: Fn(&S) -> K + Send + Sync + 'static,
{
    Arc::new(move |state: &S| {
        let key = router(state);
        routes.get(&key).cloned().ok_or_else(|| GraphError::UnknownRouteTarget(format!("{key:?}")))
    })
}

/// Edge type
pub enum Edge<S> {
    /// Direct edge: always go from source to target
    Direct { source: String, target: EdgeTarget },

    /// Conditional edge: route based on state
    Conditional {
        source: String,
        router: RouterFn<S>,
        /// Every target the router can produce (for validation)
        targets: Vec<EdgeTarget>,
    },

    /// Entry edge: from START to the first node
    Entry { target: String },
}

impl<S> Edge<S> {
    /// Source node of this edge, `START` for the entry edge
    pub fn source(&self) -> &str {
        match self {
            Self::Direct { source, .. } | Self::Conditional { source, .. } => source,
            Self::Entry { .. } => START,
        }
    }
}

impl<S> std::fmt::Debug for Edge<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct { source, target } => {
                f.debug_struct("Direct").field("source", source).field("target", target).finish()
            }
            Self::Conditional { source, targets, .. } => f
                .debug_struct("Conditional")
                .field("source", source)
                .field("targets", targets)
                .finish(),
            Self::Entry { target } => f.debug_struct("Entry").field("target", target).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Light {
        Red,
        Green,
        Blue,
    }

    #[test]
    fn test_edge_target_from_str() {
        assert_eq!(EdgeTarget::from(END), EdgeTarget::End);
        assert_eq!(EdgeTarget::from("a").node_name(), Some("a"));
        assert!(EdgeTarget::End.is_end());
    }

    #[test]
    fn test_keyed_router_maps_enum_keys() {
        let routes = HashMap::from([
            (Light::Red, EdgeTarget::from("stop")),
            (Light::Green, EdgeTarget::End),
        ]);
        let router = keyed_router(|light: &Light| *light, routes);

        assert_eq!(router(&Light::Red).unwrap(), EdgeTarget::Node("stop".into()));
        assert_eq!(router(&Light::Green).unwrap(), EdgeTarget::End);
        assert!(matches!(router(&Light::Blue), Err(GraphError::UnknownRouteTarget(key)) if key == "Blue"));
    }
}
