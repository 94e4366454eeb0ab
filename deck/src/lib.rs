//! # deck
//!
//! Builds image slideshows from NASA's public image archive with a team of
//! LLM agents.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    SlideshowOrchestrator                     │
//! │                                                              │
//! │  request ──► PlannerAgent ──► PresentationOutline            │
//! │                                     │                        │
//! │                  for each slide, in order                    │
//! │                                     ▼                        │
//! │   ┌──────────────── slide workflow graph ─────────────────┐  │
//! │   │  search ──► select ──► review ──► (approved) done     │  │
//! │   │    ▲   NASA    │  Researcher │  Reviewer              │  │
//! │   │    └───────────┴─────────────┘                        │  │
//! │   │           attempts exhausted ──► judge ──► done       │  │
//! │   └───────────────────────────────────────────────────────┘  │
//! │                                     │                        │
//! │                                     ▼                        │
//! │                                 Slideshow                    │
//! └──────────────────────────────────────────────────────────────┘
//!            │ WorkflowEvent (unbounded channel, FIFO)
//!            ▼
//!        caller callback / DeckOutput
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use deck::{DeckConfig, DeckOutput, SlideshowOrchestrator};
//!
//! let config = DeckConfig::from_env()?;
//! let orchestrator = SlideshowOrchestrator::from_config(&config)?;
//! let output = DeckOutput::new(config.debug_level);
//!
//! let slideshow = orchestrator
//!     .run("The history of Mars exploration", |event| output.render(&event))
//!     .await?;
//! ```

pub mod agents;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod nasa;
pub mod orchestrator;
pub mod output;
pub mod prompts;
pub mod state;
pub mod telemetry;
pub mod workflow;

pub use agents::SlideAgents;
pub use config::{
    DebugLevel, DeckConfig, DeckConfigBuilder, ModelSettings, NasaSettings, TelemetryConfig,
    ValidationError, WorkflowSettings,
};
pub use error::{DeckError, Result};
pub use events::{CandidateSummary, EventSink, RunPhase, WorkflowEvent};
pub use models::{
    FinalSlide, ImageSelection, NasaImage, PresentationOutline, ReviewResult, SlideOutlineItem,
    Slideshow,
};
pub use nasa::{ImageSearch, NasaImageClient, format_image_for_display, format_images_summary};
pub use orchestrator::SlideshowOrchestrator;
pub use output::DeckOutput;
pub use state::{AttemptRecord, Phase, SlideWorkflowState};
pub use workflow::{build_slide_workflow, determine_search_query};
