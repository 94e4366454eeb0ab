#![allow(dead_code)]

use async_trait::async_trait;
use deck::{
    DeckError, EventSink, ImageSearch, NasaImage, PresentationOutline, SlideOutlineItem,
    WorkflowEvent,
};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;

pub enum SearchReply {
    Images(Vec<NasaImage>),
    Error(String),
}

/// Image search that serves scripted replies, then repeats `fallback`.
pub struct ScriptedSearch {
    script: Mutex<VecDeque<SearchReply>>,
    fallback: Vec<NasaImage>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedSearch {
    pub fn always(images: Vec<NasaImage>) -> Self {
        Self { script: Mutex::new(VecDeque::new()), fallback: images, queries: Mutex::new(Vec::new()) }
    }

    pub fn empty() -> Self {
        Self::always(Vec::new())
    }

    pub fn then(self, reply: SearchReply) -> Self {
        self.script.lock().unwrap().push_back(reply);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageSearch for ScriptedSearch {
    async fn search(&self, query: &str, max_results: usize) -> deck::Result<Vec<NasaImage>> {
        self.queries.lock().unwrap().push(query.to_string());
        match self.script.lock().unwrap().pop_front() {
            Some(SearchReply::Images(images)) => Ok(images.into_iter().take(max_results).collect()),
            Some(SearchReply::Error(message)) => Err(DeckError::Search(message)),
            None => Ok(self.fallback.iter().take(max_results).cloned().collect()),
        }
    }
}

pub fn image(id: &str) -> NasaImage {
    NasaImage {
        nasa_id: id.to_string(),
        title: format!("{id} title"),
        description: format!("{id} description"),
        date_created: "1969-07-20T00:00:00Z".to_string(),
        center: "JSC".to_string(),
        keywords: vec!["Apollo".to_string(), "Moon".to_string()],
        thumbnail_url: Some(format!("https://images.example/{id}~thumb.jpg")),
        preview_url: Some(format!("https://images.example/{id}~thumb.jpg")),
    }
}

pub fn images(ids: &[&str]) -> Vec<NasaImage> {
    ids.iter().map(|id| image(id)).collect()
}

pub fn slide(position: u32, subject: &str, keywords: &[&str]) -> SlideOutlineItem {
    SlideOutlineItem {
        position,
        subject: subject.to_string(),
        topic: format!("{subject} up close"),
        search_keywords: keywords.iter().map(|k| k.to_string()).collect(),
        purpose: "Tell the story".to_string(),
    }
}

pub fn outline(slides: Vec<SlideOutlineItem>) -> PresentationOutline {
    PresentationOutline {
        title: "Apollo".to_string(),
        narrative: "From launch to splashdown".to_string(),
        slides,
    }
}

pub fn outline_json(outline: &PresentationOutline) -> Value {
    serde_json::to_value(outline).unwrap()
}

pub fn selection(id: &str) -> Value {
    json!({ "nasa_id": id, "title": format!("{id} title"), "reason": "fits the topic", "thumbnail_url": null })
}

pub fn approve() -> Value {
    json!({ "approved": true, "feedback": "shows the subject", "issues": [], "search_suggestion": null })
}

pub fn reject(feedback: &str) -> Value {
    json!({ "approved": false, "feedback": feedback, "issues": ["wrong view"], "search_suggestion": "Moon full" })
}

/// Decodes both as a selection of `id` and as a rejection.
pub fn select_and_reject(id: &str) -> String {
    json!({
        "nasa_id": id,
        "title": format!("{id} title"),
        "reason": "close enough",
        "approved": false,
        "feedback": "not quite"
    })
    .to_string()
}

pub fn drain(mut rx: UnboundedReceiver<WorkflowEvent>) -> Vec<WorkflowEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn kinds(events: &[WorkflowEvent]) -> Vec<&'static str> {
    events.iter().map(WorkflowEvent::kind).collect()
}

pub fn channel() -> (EventSink, UnboundedReceiver<WorkflowEvent>) {
    EventSink::channel()
}
