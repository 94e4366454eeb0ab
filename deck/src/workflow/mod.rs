//! The per-slide image selection graph.
//!
//! ```text
//!            ┌──────────── retry ───────────┐
//!            ▼                              │
//! START → search ──→ select ──→ review ──→ END (approved)
//!          │  ▲        │  │       │
//!          │  └────────┘  │       │
//!          ▼              ▼       ▼
//!         END            judge ←──┘ (attempts exhausted)
//!                          │
//!                          ▼
//!                         END
//! ```

mod judge;
mod review;
mod search;
mod select;

pub use judge::JudgeNode;
pub use review::ReviewNode;
pub use search::{SearchNode, determine_search_query};
pub use select::SelectNode;

use crate::agents::SlideAgents;
use crate::config::WorkflowSettings;
use crate::nasa::ImageSearch;
use crate::state::{Phase, SlideWorkflowState};
use deck_graph::{CompiledGraph, END, START, StateGraph};
use std::sync::Arc;

pub const SEARCH: &str = "search";
pub const SELECT: &str = "select";
pub const REVIEW: &str = "review";
pub const JUDGE: &str = "judge";

fn route(state: &SlideWorkflowState) -> Phase {
    state.phase
}

/// Wire the four phase nodes into a graph routed by [`Phase`].
pub fn build_slide_workflow(
    agents: &SlideAgents,
    search: Arc<dyn ImageSearch>,
    settings: &WorkflowSettings,
) -> deck_graph::Result<CompiledGraph<SlideWorkflowState>> {
    StateGraph::<SlideWorkflowState>::new()
        .add_node(SearchNode::new(search, settings.max_search_results))
        .add_node(SelectNode::new(agents.researcher.clone(), settings.max_candidates))
        .add_node(ReviewNode::new(agents.reviewer.clone()))
        .add_node(JudgeNode::new(agents.judge.clone()))
        .add_edge(START, SEARCH)
        .add_conditional_edges(
            SEARCH,
            route,
            [(Phase::Select, SELECT), (Phase::Search, SEARCH), (Phase::Done, END)],
        )
        .add_conditional_edges(
            SELECT,
            route,
            [
                (Phase::Review, REVIEW),
                (Phase::Search, SEARCH),
                (Phase::Judge, JUDGE),
                (Phase::Done, END),
            ],
        )
        .add_conditional_edges(
            REVIEW,
            route,
            [(Phase::Done, END), (Phase::Search, SEARCH), (Phase::Judge, JUDGE)],
        )
        .add_edge(JUDGE, END)
        .compile()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::events::{EventSink, WorkflowEvent};
    use crate::models::{NasaImage, PresentationOutline, SlideOutlineItem};
    use crate::state::SlideWorkflowState;
    use deck_graph::{ExecutionConfig, NodeContext};
    use deck_model::{ChatAgent, MockLlm};
    use std::sync::Arc;
    use tokio::sync::mpsc::UnboundedReceiver;

    pub fn state(max_attempts: u32) -> (SlideWorkflowState, UnboundedReceiver<WorkflowEvent>) {
        let item = SlideOutlineItem {
            position: 3,
            subject: "Saturn".into(),
            topic: "Rings in full view".into(),
            search_keywords: vec!["Saturn rings".into()],
            purpose: "Show the rings".into(),
        };
        let outline = PresentationOutline {
            title: "Ringed worlds".into(),
            narrative: "Saturn up close".into(),
            slides: vec![item.clone()],
        };
        let (sink, rx) = EventSink::channel();
        (SlideWorkflowState::new(item, outline, Default::default(), max_attempts, sink), rx)
    }

    pub fn image(id: &str) -> NasaImage {
        NasaImage {
            nasa_id: id.into(),
            title: format!("{id} title"),
            thumbnail_url: Some(format!("https://images.example/{id}~thumb.jpg")),
            ..Default::default()
        }
    }

    pub fn agent(llm: &Arc<MockLlm>) -> ChatAgent {
        ChatAgent::new("TestAgent", "Answer in JSON.", llm.clone())
    }

    pub fn ctx() -> NodeContext {
        NodeContext::new(ExecutionConfig::new("node-test"), 0)
    }

    pub fn kinds(rx: &mut UnboundedReceiver<WorkflowEvent>) -> Vec<&'static str> {
        let mut kinds = Vec::new();
        while let Ok(event) = rx.try_recv() {
            kinds.push(event.kind());
        }
        kinds
    }
}
