use super::REVIEW;
use crate::events::WorkflowEvent;
use crate::models::ReviewResult;
use crate::prompts::review_prompt;
use crate::state::{Phase, SlideWorkflowState};
use crate::telemetry::llm_request_span;
use deck_graph::{Node, NodeContext};
use deck_model::ChatAgent;
use tracing::Instrument;

/// Asks the reviewer whether the current selection shows the slide topic.
pub struct ReviewNode {
    reviewer: ChatAgent,
}

impl ReviewNode {
    pub fn new(reviewer: ChatAgent) -> Self {
        Self { reviewer }
    }
}

#[async_trait::async_trait]
impl Node<SlideWorkflowState> for ReviewNode {
    fn name(&self) -> &str {
        REVIEW
    }

    async fn execute(&self, state: &mut SlideWorkflowState, _ctx: &NodeContext) -> deck_graph::Result<()> {
        let position = state.position();
        let Some(selection) = state.current_selection.clone() else {
            state.phase = Phase::Search;
            return Ok(());
        };

        state.emit(WorkflowEvent::ReviewStarted {
            position,
            nasa_id: selection.nasa_id.clone(),
            title: selection.title.clone(),
        });

        let prompt = review_prompt(
            &state.full_outline,
            &state.outline_item,
            &selection,
            state.find_candidate(&selection.nasa_id),
            &state.previous_searches,
        );

        let reply = self
            .reviewer
            .run_structured::<ReviewResult>(&prompt)
            .instrument(llm_request_span(self.reviewer.name()))
            .await;

        match reply {
            Ok(Some(review)) => {
                state.record_attempt(&selection, review.approved, &review.feedback);
                state.emit(WorkflowEvent::ReviewCompleted {
                    position,
                    approved: review.approved,
                    feedback: review.feedback.clone(),
                    issues: review.issues.clone(),
                    search_suggestion: review.search_suggestion.clone(),
                });

                if review.approved {
                    tracing::info!(position, nasa_id = %selection.nasa_id, "image approved");
                    state.finish_with(selection);
                    state.phase = Phase::Done;
                } else {
                    tracing::debug!(position, nasa_id = %selection.nasa_id, feedback = %review.feedback, "image rejected");
                    state.current_selection = None;
                    state.next_attempt(Phase::Search, Phase::Judge);
                }
            }
            Ok(None) => {
                tracing::warn!(position, "reviewer returned no verdict");
                state.next_attempt(Phase::Search, Phase::Judge);
            }
            Err(e) => {
                tracing::warn!(position, error = %e, "review failed");
                state.emit(WorkflowEvent::ReviewError { position, error: e.to_string() });
                state.next_attempt(Phase::Search, Phase::Judge);
            }
        }

        Ok(())
    }
}
