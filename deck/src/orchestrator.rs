//! Slideshow orchestrator: plans the outline, then runs the image selection
//! workflow once per slide.
//!
//! Slides are processed strictly in outline order. Each slide gets a fresh
//! [`SlideWorkflowState`] seeded with the images already placed on earlier
//! slides, so no image appears twice in one slideshow.

use crate::agents::SlideAgents;
use crate::config::{DeckConfig, WorkflowSettings};
use crate::error::{DeckError, Result};
use crate::events::{EventSink, RunPhase, WorkflowEvent};
use crate::models::{FinalSlide, PresentationOutline, SlideOutlineItem, Slideshow};
use crate::nasa::{ImageSearch, NasaImageClient};
use crate::prompts::outline_prompt;
use crate::state::SlideWorkflowState;
use crate::telemetry::{llm_request_span, planning_span, slide_span, start_timing};
use crate::workflow::build_slide_workflow;
use deck_graph::{CompiledGraph, ExecutionConfig, GraphError};
use deck_model::{AzureOpenAiClient, AzureOpenAiConfig, Llm};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{Instrument, info, instrument, warn};

/// Drives a complete slideshow run.
///
/// # Example
///
/// ```rust,ignore
/// use deck::{DeckConfig, SlideshowOrchestrator};
///
/// let config = DeckConfig::from_env()?;
/// let orchestrator = SlideshowOrchestrator::from_config(&config)?;
///
/// let slideshow = orchestrator
///     .run("The Apollo program", |event| println!("{}", event.kind()))
///     .await?;
/// println!("{} slides", slideshow.total_slides());
/// ```
pub struct SlideshowOrchestrator {
    agents: SlideAgents,
    workflow: CompiledGraph<SlideWorkflowState>,
    settings: WorkflowSettings,
}

impl std::fmt::Debug for SlideshowOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideshowOrchestrator")
            .field("agents", &self.agents)
            .field("settings", &self.settings)
            .finish()
    }
}

impl SlideshowOrchestrator {
    /// Create an orchestrator whose four agents share `model`.
    pub fn new(model: Arc<dyn Llm>, search: Arc<dyn ImageSearch>, settings: WorkflowSettings) -> Result<Self> {
        Self::with_agents(SlideAgents::new(model), search, settings)
    }

    pub fn with_agents(
        agents: SlideAgents,
        search: Arc<dyn ImageSearch>,
        settings: WorkflowSettings,
    ) -> Result<Self> {
        settings.validate()?;
        let workflow = build_slide_workflow(&agents, search, &settings)?;
        Ok(Self { agents, workflow, settings })
    }

    /// Build the Azure OpenAI and NASA clients described by `config`.
    pub fn from_config(config: &DeckConfig) -> Result<Self> {
        config.model.require_credentials()?;

        let model_config = AzureOpenAiConfig::new(&config.model.endpoint, &config.model.api_key)
            .with_deployment(&config.model.deployment)
            .with_api_version(&config.model.api_version);
        let model = AzureOpenAiClient::new(model_config)
            .map_err(|e| DeckError::model(&config.model.deployment, e.to_string()))?;
        let search = NasaImageClient::new(&config.nasa)?;

        Self::with_agents(
            SlideAgents::with_settings(Arc::new(model), &config.model),
            Arc::new(search),
            config.workflow.clone(),
        )
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// Ask the planner for an outline.
    pub async fn generate_outline(&self, request: &str) -> Result<PresentationOutline> {
        let _timing = start_timing("outline");
        let planner = &self.agents.planner;

        let reply = planner
            .run_structured::<PresentationOutline>(&outline_prompt(request))
            .instrument(llm_request_span(planner.name()))
            .instrument(planning_span(planner.name()))
            .await;

        match reply {
            Ok(Some(outline)) => {
                info!(title = %outline.title, slides = outline.slide_count(), "outline ready");
                Ok(outline)
            }
            Ok(None) => Err(DeckError::Planning(format!("{} returned no outline", planner.name()))),
            Err(e) => Err(DeckError::Planning(e.to_string())),
        }
    }

    /// Run the selection workflow for one slide.
    ///
    /// `used_ids` is copied into the slide's state; the caller decides
    /// whether the returned slide's image joins the set. Emits
    /// `slide_complete` with the result.
    pub async fn select_image_for_slide(
        &self,
        item: &SlideOutlineItem,
        outline: &PresentationOutline,
        used_ids: &HashSet<String>,
        sink: &EventSink,
    ) -> Result<Option<FinalSlide>> {
        let position = item.position;
        let mut state = SlideWorkflowState::new(
            item.clone(),
            outline.clone(),
            used_ids.clone(),
            self.settings.max_attempts,
            sink.clone(),
        );
        let config = ExecutionConfig::new(&format!("slide-{position}-{}", uuid::Uuid::new_v4()))
            .with_recursion_limit(self.settings.max_iterations);

        let span = slide_span(position, outline.slide_count(), &item.subject);
        match self.workflow.invoke(&mut state, config).instrument(span).await {
            Ok(summary) => {
                info!(position, steps = summary.steps, attempts = state.current_attempt, "slide workflow finished");
            }
            Err(GraphError::RecursionLimitExceeded(steps)) => {
                warn!(position, steps, "slide workflow hit its iteration ceiling");
                sink.emit(WorkflowEvent::IterationLimit { position, steps });
            }
            Err(e) => return Err(e.into()),
        }

        let slide = state.selected_image.take();
        sink.emit(WorkflowEvent::SlideComplete { position, slide: slide.clone() });
        Ok(slide)
    }

    /// Plan the outline and fill every slide, reporting progress to `sink`.
    #[instrument(skip(self, request, sink), fields(request_len = request.len()))]
    pub async fn build_slideshow(&self, request: &str, sink: EventSink) -> Result<Slideshow> {
        sink.emit(WorkflowEvent::phase(RunPhase::Planning, "Creating presentation outline..."));
        let outline = match self.generate_outline(request).await {
            Ok(outline) => outline,
            Err(e) => {
                warn!(error = %e, "planning failed");
                sink.emit(WorkflowEvent::error(RunPhase::Planning, e.to_string()));
                return Err(e);
            }
        };
        sink.emit(WorkflowEvent::OutlineReady {
            title: outline.title.clone(),
            narrative: outline.narrative.clone(),
            slides: outline.slides.clone(),
        });

        let total = outline.slide_count();
        sink.emit(WorkflowEvent::phase(
            RunPhase::ImageSelection,
            format!("Selecting images for {total} slides..."),
        ));

        let mut slides = Vec::with_capacity(total);
        let mut used_ids = HashSet::new();

        for item in &outline.slides {
            sink.emit(WorkflowEvent::SlideStarted {
                position: item.position,
                subject: item.subject.clone(),
                topic: item.topic.clone(),
                total,
            });

            let selected = match self.select_image_for_slide(item, &outline, &used_ids, &sink).await {
                Ok(selected) => selected,
                Err(e) => {
                    sink.emit(WorkflowEvent::error(RunPhase::ImageSelection, e.to_string()));
                    return Err(e);
                }
            };

            match selected {
                Some(slide) => {
                    used_ids.insert(slide.nasa_id().to_string());
                    sink.emit(WorkflowEvent::SlideSelected {
                        position: item.position,
                        nasa_id: slide.image.nasa_id.clone(),
                        title: slide.image.title.clone(),
                        thumbnail_url: slide.thumbnail_url.clone(),
                    });
                    slides.push(slide);
                }
                None => {
                    warn!(position = item.position, topic = %item.topic, "no image for slide");
                    sink.emit(WorkflowEvent::SlideFailed {
                        position: item.position,
                        message: format!("Could not find suitable image for {}", item.topic),
                    });
                }
            }
        }

        sink.emit(WorkflowEvent::phase(
            RunPhase::Complete,
            format!("Slideshow complete with {} slides!", slides.len()),
        ));
        sink.emit(WorkflowEvent::SlideshowComplete {
            title: outline.title.clone(),
            narrative: outline.narrative.clone(),
            slides: slides.clone(),
            total_slides: slides.len(),
        });

        Ok(Slideshow {
            title: outline.title,
            narrative: outline.narrative,
            slides,
            generated_at: chrono::Utc::now(),
        })
    }

    /// Build a slideshow, handing every event to `on_event` in emission order.
    pub async fn run<F>(&self, request: &str, mut on_event: F) -> Result<Slideshow>
    where
        F: FnMut(WorkflowEvent),
    {
        let (sink, mut rx) = EventSink::channel();

        let build = self.build_slideshow(request, sink);
        let forward = async {
            while let Some(event) = rx.recv().await {
                on_event(event);
            }
        };

        let (result, ()) = tokio::join!(build, forward);
        result
    }
}
