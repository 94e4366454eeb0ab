//! Progress events and the channel they travel on.
//!
//! Every step of a run reports what it is doing as a [`WorkflowEvent`].
//! Events are pushed onto an unbounded queue by an [`EventSink`] and read
//! in order by whoever holds the receiver. Emitting never blocks and a
//! closed receiver is ignored, so reporting cannot change the outcome of a
//! run.

use crate::models::{FinalSlide, SlideOutlineItem};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Top-level stage of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Planning,
    ImageSelection,
    Complete,
}

/// Short description of a search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub nasa_id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
}

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkflowEvent {
    Phase { phase: RunPhase, message: String },
    OutlineReady { title: String, narrative: String, slides: Vec<SlideOutlineItem> },
    /// A failure that ends the run
    Error { phase: RunPhase, message: String },
    SlideStarted { position: u32, subject: String, topic: String, total: usize },

    SearchStarted { position: u32, attempt: u32, subject: String },
    SearchError { position: u32, error: String },
    SearchCompleted {
        position: u32,
        query: String,
        result_count: usize,
        candidates: Vec<CandidateSummary>,
    },
    SearchRetry { position: u32, message: String },

    SelectionStarted { position: u32, candidate_count: usize },
    ImageSelected {
        position: u32,
        nasa_id: String,
        title: String,
        reason: String,
        thumbnail_url: Option<String>,
    },
    SelectionError { position: u32, error: String },

    ReviewStarted { position: u32, nasa_id: String, title: String },
    ReviewCompleted {
        position: u32,
        approved: bool,
        feedback: String,
        issues: Vec<String>,
        search_suggestion: Option<String>,
    },
    ReviewError { position: u32, error: String },

    JudgeStarted { position: u32, attempt_count: usize },
    JudgeSelected { position: u32, nasa_id: String, title: String, reason: String },
    JudgeError { position: u32, error: String },

    /// The per-slide workflow hit its step ceiling
    IterationLimit { position: u32, steps: usize },
    SlideComplete { position: u32, slide: Option<FinalSlide> },
    SlideSelected {
        position: u32,
        nasa_id: String,
        title: String,
        thumbnail_url: Option<String>,
    },
    SlideFailed { position: u32, message: String },
    SlideshowComplete {
        title: String,
        narrative: String,
        slides: Vec<FinalSlide>,
        total_slides: usize,
    },
}

impl WorkflowEvent {
    pub fn phase(phase: RunPhase, message: impl Into<String>) -> Self {
        Self::Phase { phase, message: message.into() }
    }

    pub fn error(phase: RunPhase, message: impl Into<String>) -> Self {
        Self::Error { phase, message: message.into() }
    }

    /// The `type` tag this event serializes with.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Phase { .. } => "phase",
            Self::OutlineReady { .. } => "outline_ready",
            Self::Error { .. } => "error",
            Self::SlideStarted { .. } => "slide_started",
            Self::SearchStarted { .. } => "search_started",
            Self::SearchError { .. } => "search_error",
            Self::SearchCompleted { .. } => "search_completed",
            Self::SearchRetry { .. } => "search_retry",
            Self::SelectionStarted { .. } => "selection_started",
            Self::ImageSelected { .. } => "image_selected",
            Self::SelectionError { .. } => "selection_error",
            Self::ReviewStarted { .. } => "review_started",
            Self::ReviewCompleted { .. } => "review_completed",
            Self::ReviewError { .. } => "review_error",
            Self::JudgeStarted { .. } => "judge_started",
            Self::JudgeSelected { .. } => "judge_selected",
            Self::JudgeError { .. } => "judge_error",
            Self::IterationLimit { .. } => "iteration_limit",
            Self::SlideComplete { .. } => "slide_complete",
            Self::SlideSelected { .. } => "slide_selected",
            Self::SlideFailed { .. } => "slide_failed",
            Self::SlideshowComplete { .. } => "slideshow_complete",
        }
    }
}

/// Sending half of the event channel.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: Option<mpsc::UnboundedSender<WorkflowEvent>>,
}

impl EventSink {
    /// Create a connected sink and its receiver.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<WorkflowEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A sink that drops everything.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn emit(&self, event: WorkflowEvent) {
        tracing::trace!(event = event.kind(), "workflow event");
        if let Some(tx) = &self.tx {
            // A dropped receiver only means nobody is listening.
            let _ = tx.send(event);
        }
    }
}

impl Default for EventSink {
    fn default() -> Self {
        Self::disabled()
    }
}
