use super::JUDGE;
use crate::events::WorkflowEvent;
use crate::models::ImageSelection;
use crate::prompts::judge_prompt;
use crate::state::{Phase, SlideWorkflowState};
use crate::telemetry::llm_request_span;
use deck_graph::{Node, NodeContext};
use deck_model::ChatAgent;
use tracing::Instrument;

/// Picks the least-bad reviewed image once the attempt budget is spent.
pub struct JudgeNode {
    judge: ChatAgent,
}

impl JudgeNode {
    pub fn new(judge: ChatAgent) -> Self {
        Self { judge }
    }

    fn fallback(state: &mut SlideWorkflowState) {
        let Some(first) = state.conversation_history.first() else {
            return;
        };
        let image = ImageSelection { reason: "Fallback selection".to_string(), ..first.selected.clone() };
        tracing::info!(position = state.position(), nasa_id = %image.nasa_id, "judge fell back to first attempt");
        state.finish_with(image);
    }
}

#[async_trait::async_trait]
impl Node<SlideWorkflowState> for JudgeNode {
    fn name(&self) -> &str {
        JUDGE
    }

    async fn execute(&self, state: &mut SlideWorkflowState, _ctx: &NodeContext) -> deck_graph::Result<()> {
        let position = state.position();
        state.emit(WorkflowEvent::JudgeStarted {
            position,
            attempt_count: state.conversation_history.len(),
        });
        state.phase = Phase::Done;

        if state.conversation_history.is_empty() {
            return Ok(());
        }

        let prompt = judge_prompt(&state.outline_item, &state.conversation_history);
        let reply = self
            .judge
            .run_structured::<ImageSelection>(&prompt)
            .instrument(llm_request_span(self.judge.name()))
            .await;

        match reply {
            Ok(Some(choice)) => {
                let attempted = state
                    .conversation_history
                    .iter()
                    .find(|record| record.selected.nasa_id == choice.nasa_id)
                    .map(|record| record.selected.thumbnail_url.clone());

                match attempted {
                    Some(thumbnail_url) => {
                        state.emit(WorkflowEvent::JudgeSelected {
                            position,
                            nasa_id: choice.nasa_id.clone(),
                            title: choice.title.clone(),
                            reason: choice.reason.clone(),
                        });
                        state.finish_with(ImageSelection {
                            reason: format!("Judge selected: {}", choice.reason),
                            thumbnail_url,
                            ..choice
                        });
                    }
                    None => {
                        tracing::warn!(position, nasa_id = %choice.nasa_id, "judge picked an image that was never attempted");
                        Self::fallback(state);
                    }
                }
            }
            Ok(None) => {
                tracing::warn!(position, "judge returned no choice");
                Self::fallback(state);
            }
            Err(e) => {
                tracing::warn!(position, error = %e, "judge failed");
                state.emit(WorkflowEvent::JudgeError { position, error: e.to_string() });
                Self::fallback(state);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::fixtures::{agent, ctx, kinds, state};
    use deck_model::MockLlm;
    use serde_json::json;
    use std::sync::Arc;

    fn rejected(state: &mut SlideWorkflowState, id: &str) {
        let selection = ImageSelection {
            nasa_id: id.into(),
            title: format!("{id} title"),
            reason: "close".into(),
            thumbnail_url: Some(format!("https://images.example/{id}~thumb.jpg")),
        };
        state.record_attempt(&selection, false, "wrong view");
        state.current_attempt += 1;
    }

    #[tokio::test]
    async fn test_empty_history_ends_without_a_slide() {
        let llm = Arc::new(MockLlm::new("mock"));
        let node = JudgeNode::new(agent(&llm));
        let (mut state, mut rx) = state(3);
        state.current_attempt = 3;
        state.phase = Phase::Judge;

        node.execute(&mut state, &ctx()).await.unwrap();

        assert_eq!(state.phase, Phase::Done);
        assert!(state.selected_image.is_none());
        assert_eq!(llm.call_count(), 0);
        assert_eq!(kinds(&mut rx), vec!["judge_started"]);
    }

    #[tokio::test]
    async fn test_choice_keeps_thumbnail_from_history() {
        let llm = Arc::new(MockLlm::new("mock").with_json(json!({
            "nasa_id": "B", "title": "B title", "reason": "least cropped", "thumbnail_url": null
        })));
        let node = JudgeNode::new(agent(&llm));
        let (mut state, mut rx) = state(2);
        rejected(&mut state, "A");
        rejected(&mut state, "B");

        node.execute(&mut state, &ctx()).await.unwrap();

        assert_eq!(state.phase, Phase::Done);
        let slide = state.selected_image.as_ref().unwrap();
        assert_eq!(slide.nasa_id(), "B");
        assert_eq!(slide.image.reason, "Judge selected: least cropped");
        assert_eq!(slide.thumbnail_url.as_deref(), Some("https://images.example/B~thumb.jpg"));
        assert!(state.already_selected_ids.contains("B"));
        assert!(llm.requests()[0].last_user_message().unwrap().contains("CANDIDATE 2: B"));
        assert_eq!(kinds(&mut rx), vec!["judge_started", "judge_selected"]);
    }

    #[tokio::test]
    async fn test_error_falls_back_to_first_attempt() {
        let llm = Arc::new(MockLlm::new("mock").with_error("quota exceeded"));
        let node = JudgeNode::new(agent(&llm));
        let (mut state, mut rx) = state(2);
        rejected(&mut state, "A");
        rejected(&mut state, "B");

        node.execute(&mut state, &ctx()).await.unwrap();

        let slide = state.selected_image.as_ref().unwrap();
        assert_eq!(slide.nasa_id(), "A");
        assert_eq!(slide.image.reason, "Fallback selection");
        assert!(state.already_selected_ids.contains("A"));
        assert_eq!(kinds(&mut rx), vec!["judge_started", "judge_error"]);
    }
}
