//! Finished slides and the assembled slideshow.

use super::image::ImageSelection;
use crate::error::{DeckError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A slide with its chosen image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalSlide {
    pub position: u32,
    pub subject: String,
    pub topic: String,
    pub image: ImageSelection,
    pub thumbnail_url: Option<String>,
}

impl FinalSlide {
    pub fn nasa_id(&self) -> &str {
        &self.image.nasa_id
    }
}

/// The result of a complete run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slideshow {
    pub title: String,
    pub narrative: String,
    pub slides: Vec<FinalSlide>,
    pub generated_at: DateTime<Utc>,
}

impl Slideshow {
    pub fn total_slides(&self) -> usize {
        self.slides.len()
    }

    /// Write the slideshow as pretty-printed JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| DeckError::file(path.display().to_string(), e.to_string()))
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| DeckError::file(path.display().to_string(), e.to_string()))?;
        Ok(serde_json::from_str(&raw)?)
    }
}
