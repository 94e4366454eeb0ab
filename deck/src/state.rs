//! Per-slide workflow state.

use crate::events::{EventSink, WorkflowEvent};
use crate::models::{FinalSlide, ImageSelection, NasaImage, PresentationOutline, SlideOutlineItem};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Where the slide workflow goes next. Also the routing key of the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Search,
    Select,
    Review,
    Judge,
    Done,
}

/// One reviewed selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// 1-based attempt number at review time
    pub attempt: u32,
    pub search_query: String,
    pub selected: ImageSelection,
    pub approved: bool,
    pub feedback: String,
}

/// Everything one slide's workflow reads and writes.
#[derive(Debug, Clone)]
pub struct SlideWorkflowState {
    pub outline_item: SlideOutlineItem,
    pub full_outline: PresentationOutline,

    pub current_search_query: String,
    pub current_candidates: Vec<NasaImage>,
    /// Every query issued so far, without repeats
    pub previous_searches: Vec<String>,

    pub current_attempt: u32,
    pub max_attempts: u32,
    pub current_selection: Option<ImageSelection>,
    pub conversation_history: Vec<AttemptRecord>,

    pub selected_image: Option<FinalSlide>,
    pub phase: Phase,

    pub already_selected_ids: HashSet<String>,
    events: EventSink,
}

impl SlideWorkflowState {
    pub fn new(
        outline_item: SlideOutlineItem,
        full_outline: PresentationOutline,
        already_selected_ids: HashSet<String>,
        max_attempts: u32,
        events: EventSink,
    ) -> Self {
        Self {
            outline_item,
            full_outline,
            current_search_query: String::new(),
            current_candidates: Vec::new(),
            previous_searches: Vec::new(),
            current_attempt: 0,
            max_attempts,
            current_selection: None,
            conversation_history: Vec::new(),
            selected_image: None,
            phase: Phase::Search,
            already_selected_ids,
            events,
        }
    }

    pub fn position(&self) -> u32 {
        self.outline_item.position
    }

    pub fn has_exceeded_max_attempts(&self) -> bool {
        self.current_attempt >= self.max_attempts
    }

    /// Consume one attempt and pick `next`, or `exhausted` once the budget is spent.
    pub fn next_attempt(&mut self, next: Phase, exhausted: Phase) {
        self.current_attempt += 1;
        self.phase = if self.has_exceeded_max_attempts() { exhausted } else { next };
    }

    pub fn record_search(&mut self, query: &str) {
        self.current_search_query = query.to_string();
        if !self.previous_searches.iter().any(|q| q == query) {
            self.previous_searches.push(query.to_string());
        }
    }

    pub fn record_attempt(&mut self, selection: &ImageSelection, approved: bool, feedback: &str) {
        self.conversation_history.push(AttemptRecord {
            attempt: self.current_attempt + 1,
            search_query: self.current_search_query.clone(),
            selected: selection.clone(),
            approved,
            feedback: feedback.to_string(),
        });
    }

    pub fn mark_image_used(&mut self, nasa_id: &str) {
        self.already_selected_ids.insert(nasa_id.to_string());
    }

    pub fn filter_unused_candidates(&self, candidates: Vec<NasaImage>) -> Vec<NasaImage> {
        candidates.into_iter().filter(|c| !self.already_selected_ids.contains(&c.nasa_id)).collect()
    }

    pub fn find_candidate(&self, nasa_id: &str) -> Option<&NasaImage> {
        self.current_candidates.iter().find(|c| c.nasa_id == nasa_id)
    }

    /// Store the finished slide and reserve its image.
    pub fn finish_with(&mut self, image: ImageSelection) {
        self.mark_image_used(&image.nasa_id);
        self.selected_image = Some(FinalSlide {
            position: self.outline_item.position,
            subject: self.outline_item.subject.clone(),
            topic: self.outline_item.topic.clone(),
            thumbnail_url: image.thumbnail_url.clone(),
            image,
        });
    }

    pub fn emit(&self, event: WorkflowEvent) {
        self.events.emit(event);
    }
}
