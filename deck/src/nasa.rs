//! NASA Images API client and prompt formatting for search results.

use crate::config::NasaSettings;
use crate::error::{DeckError, Result};
use crate::models::NasaImage;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

const MAX_DESCRIPTION_CHARS: usize = 500;
const MAX_KEYWORDS: usize = 10;

/// Anything that can answer an image search.
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Return at most `max_results` images for `query`.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<NasaImage>>;
}

/// Client for `images-api.nasa.gov`.
#[derive(Debug, Clone)]
pub struct NasaImageClient {
    client: Client,
    base_url: String,
    year_start: u16,
    year_end: u16,
}

impl NasaImageClient {
    pub fn new(settings: &NasaSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| DeckError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            year_start: settings.year_start,
            year_end: settings.year_end,
        })
    }

    /// URLs of every stored size of an image. Failures yield an empty list.
    pub async fn image_variants(&self, nasa_id: &str) -> Vec<String> {
        match self.fetch_variants(nasa_id).await {
            Ok(urls) => urls,
            Err(e) => {
                tracing::debug!(nasa_id, error = %e, "asset lookup failed");
                Vec::new()
            }
        }
    }

    async fn fetch_variants(&self, nasa_id: &str) -> Result<Vec<String>> {
        let url = format!("{}/asset/{}", self.base_url, nasa_id);
        let body: Value = self.client.get(url).send().await?.error_for_status()?.json().await?;

        Ok(collection_items(&body)
            .iter()
            .filter_map(|item| item.get("href").and_then(Value::as_str))
            .filter(|href| !href.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[async_trait]
impl ImageSearch for NasaImageClient {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<NasaImage>> {
        let url = format!("{}/search", self.base_url);
        let params = [
            ("q", query.to_string()),
            ("media_type", "image".to_string()),
            ("year_start", self.year_start.to_string()),
            ("year_end", self.year_end.to_string()),
            ("page", "1".to_string()),
        ];

        let body: Value = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let images = parse_search_response(&body, max_results);
        tracing::debug!(count = images.len(), "search finished");
        Ok(images)
    }
}

fn collection_items(body: &Value) -> &[Value] {
    body.pointer("/collection/items").and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}

/// Convert a `/search` response into images, keeping the first `max_results` items.
pub fn parse_search_response(body: &Value, max_results: usize) -> Vec<NasaImage> {
    collection_items(body).iter().take(max_results).map(parse_item).collect()
}

fn parse_item(item: &Value) -> NasaImage {
    let data = item.pointer("/data/0").cloned().unwrap_or(Value::Null);
    let text = |key: &str| data.get(key).and_then(Value::as_str).map(str::to_string);

    let preview_url = item
        .get("links")
        .and_then(Value::as_array)
        .and_then(|links| {
            links.iter().find(|link| link.get("rel").and_then(Value::as_str) == Some("preview"))
        })
        .and_then(|link| link.get("href").and_then(Value::as_str))
        .map(str::to_string);

    let keywords = data
        .get("keywords")
        .and_then(Value::as_array)
        .map(|kws| {
            kws.iter().filter_map(Value::as_str).take(MAX_KEYWORDS).map(str::to_string).collect()
        })
        .unwrap_or_default();

    NasaImage {
        nasa_id: text("nasa_id").unwrap_or_default(),
        title: text("title").unwrap_or_else(|| "Untitled".to_string()),
        description: truncate_chars(&text("description").unwrap_or_default(), MAX_DESCRIPTION_CHARS),
        date_created: text("date_created").unwrap_or_default(),
        center: text("center").unwrap_or_default(),
        keywords,
        thumbnail_url: preview_url.clone(),
        preview_url,
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Numbered candidate list for agent prompts.
pub fn format_images_summary(images: &[NasaImage], max_images: usize) -> String {
    if images.is_empty() {
        return "No images found.".to_string();
    }

    let mut lines = Vec::new();
    for (i, img) in images.iter().take(max_images).enumerate() {
        let keywords =
            if img.keywords.is_empty() { "none".to_string() } else { img.keywords[..img.keywords.len().min(3)].join(", ") };
        lines.push(format!("{}. [{}] {}", i + 1, img.nasa_id, img.title));
        lines.push(format!("   Keywords: {keywords}"));
        lines.push(format!("   Description: {}...", truncate_chars(&img.description, 150)));
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Multi-line description of a single image for terminal display.
pub fn format_image_for_display(image: &NasaImage) -> String {
    let keywords = if image.keywords.is_empty() {
        "None".to_string()
    } else {
        image.keywords[..image.keywords.len().min(5)].join(", ")
    };
    let date = if image.date_created.is_empty() {
        "Unknown".to_string()
    } else {
        truncate_chars(&image.date_created, 10)
    };
    let center = if image.center.is_empty() { "Unknown" } else { &image.center };
    let ellipsis = if image.description.chars().count() > 200 { "..." } else { "" };

    format!(
        "{}\n- NASA ID: {}\n- Date: {}\n- Center: {}\n- Keywords: {}\n- Description: {}{}",
        image.title,
        image.nasa_id,
        date,
        center,
        keywords,
        truncate_chars(&image.description, 200),
        ellipsis
    )
}
