use super::SELECT;
use crate::events::WorkflowEvent;
use crate::models::ImageSelection;
use crate::prompts::selection_prompt;
use crate::state::{Phase, SlideWorkflowState};
use crate::telemetry::llm_request_span;
use deck_graph::{Node, NodeContext};
use deck_model::ChatAgent;
use tracing::Instrument;

/// Asks the researcher to pick one of the current candidates.
pub struct SelectNode {
    researcher: ChatAgent,
    max_candidates: usize,
}

impl SelectNode {
    pub fn new(researcher: ChatAgent, max_candidates: usize) -> Self {
        Self { researcher, max_candidates }
    }
}

#[async_trait::async_trait]
impl Node<SlideWorkflowState> for SelectNode {
    fn name(&self) -> &str {
        SELECT
    }

    async fn execute(&self, state: &mut SlideWorkflowState, _ctx: &NodeContext) -> deck_graph::Result<()> {
        let position = state.position();
        state.emit(WorkflowEvent::SelectionStarted {
            position,
            candidate_count: state.current_candidates.len(),
        });

        if state.has_exceeded_max_attempts() {
            state.phase = Phase::Judge;
            return Ok(());
        }

        if state.current_candidates.is_empty() {
            state.next_attempt(Phase::Search, Phase::Done);
            return Ok(());
        }

        let prompt = selection_prompt(
            &state.full_outline,
            &state.outline_item,
            &state.current_candidates,
            self.max_candidates,
            &state.conversation_history,
        );

        let reply = self
            .researcher
            .run_structured::<ImageSelection>(&prompt)
            .instrument(llm_request_span(self.researcher.name()))
            .await;

        match reply {
            Ok(Some(mut selection)) => {
                match state.find_candidate(&selection.nasa_id) {
                    Some(image) => selection.thumbnail_url = image.thumbnail_url.clone(),
                    None => {
                        tracing::warn!(position, nasa_id = %selection.nasa_id, "researcher picked an image outside the candidates");
                        selection.thumbnail_url = None;
                    }
                }

                state.emit(WorkflowEvent::ImageSelected {
                    position,
                    nasa_id: selection.nasa_id.clone(),
                    title: selection.title.clone(),
                    reason: selection.reason.clone(),
                    thumbnail_url: selection.thumbnail_url.clone(),
                });
                state.current_selection = Some(selection);
                state.phase = Phase::Review;
            }
            Ok(None) => {
                tracing::warn!(position, "researcher returned no selection");
                state.next_attempt(Phase::Search, Phase::Judge);
            }
            Err(e) => {
                tracing::warn!(position, error = %e, "selection failed");
                state.emit(WorkflowEvent::SelectionError { position, error: e.to_string() });
                state.next_attempt(Phase::Search, Phase::Judge);
            }
        }

        Ok(())
    }
}
