//! The four chat agents used by a run.

use crate::config::ModelSettings;
use crate::prompts;
use deck_model::{ChatAgent, Llm};
use std::sync::Arc;

/// Planner, researcher, reviewer and judge sharing one model backend.
#[derive(Debug, Clone)]
pub struct SlideAgents {
    pub planner: ChatAgent,
    pub researcher: ChatAgent,
    pub reviewer: ChatAgent,
    pub judge: ChatAgent,
}

impl SlideAgents {
    pub fn new(model: Arc<dyn Llm>) -> Self {
        Self {
            planner: ChatAgent::new(prompts::PLANNER_NAME, prompts::PLANNER_INSTRUCTIONS, model.clone()),
            researcher: ChatAgent::new(
                prompts::RESEARCHER_NAME,
                prompts::RESEARCHER_INSTRUCTIONS,
                model.clone(),
            ),
            reviewer: ChatAgent::new(prompts::REVIEWER_NAME, prompts::REVIEWER_INSTRUCTIONS, model.clone()),
            judge: ChatAgent::new(prompts::JUDGE_NAME, prompts::JUDGE_INSTRUCTIONS, model),
        }
    }

    /// Agents with the sampling options from `settings` applied.
    pub fn with_settings(model: Arc<dyn Llm>, settings: &ModelSettings) -> Self {
        let agents = Self::new(model);
        let tune = |mut agent: ChatAgent| {
            if let Some(temperature) = settings.temperature {
                agent = agent.with_temperature(temperature);
            }
            if let Some(max_tokens) = settings.max_tokens {
                agent = agent.with_max_tokens(max_tokens);
            }
            agent
        };

        Self {
            planner: tune(agents.planner),
            researcher: tune(agents.researcher),
            reviewer: tune(agents.reviewer),
            judge: tune(agents.judge),
        }
    }
}
