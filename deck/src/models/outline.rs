//! Presentation outline produced by the planner agent.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One planned slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SlideOutlineItem {
    /// 1-based slide number
    pub position: u32,
    /// Main subject shown on the slide
    pub subject: String,
    /// The aspect of the subject this slide covers
    pub topic: String,
    /// Short (1-2 word) NASA archive search terms
    pub search_keywords: Vec<String>,
    /// Why the slide belongs in the story
    pub purpose: String,
}

/// The full plan for a presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PresentationOutline {
    pub title: String,
    /// Brief description of the visual journey
    pub narrative: String,
    pub slides: Vec<SlideOutlineItem>,
}

impl PresentationOutline {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}
