//! NASA image records and the verdicts agents return about them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An image returned by the NASA Images API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NasaImage {
    pub nasa_id: String,
    pub title: String,
    /// Truncated to 500 characters
    pub description: String,
    pub date_created: String,
    pub center: String,
    /// At most 10 keywords
    pub keywords: Vec<String>,
    pub thumbnail_url: Option<String>,
    pub preview_url: Option<String>,
}

/// An image chosen by the researcher or the judge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ImageSelection {
    /// NASA ID of the chosen image, copied exactly from the candidate list
    pub nasa_id: String,
    pub title: String,
    /// Why this image fits the slide
    pub reason: String,
    /// Filled in by the workflow; leave null
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// The reviewer's verdict on a selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReviewResult {
    pub approved: bool,
    /// Explanation of the visual match or mismatch
    pub feedback: String,
    /// Specific visual problems
    #[serde(default)]
    pub issues: Vec<String>,
    /// 2-3 word search to try next when rejected, otherwise null
    #[serde(default)]
    pub search_suggestion: Option<String>,
}
