use super::SEARCH;
use crate::events::{CandidateSummary, WorkflowEvent};
use crate::models::SlideOutlineItem;
use crate::nasa::ImageSearch;
use crate::state::{Phase, SlideWorkflowState};
use deck_graph::{Node, NodeContext};
use std::sync::Arc;

const CANDIDATES_IN_EVENT: usize = 5;

/// Query for the given 0-based attempt, simplest last.
///
/// Attempt 0 pairs the subject with the first keyword, attempt 1 is the bare
/// subject, attempt 2 tries the second keyword (or the first word of a
/// space-separated subject) and later attempts cycle through the keywords.
pub fn determine_search_query(item: &SlideOutlineItem, attempt: u32) -> String {
    let keywords = &item.search_keywords;
    let subject = item.subject.as_str();

    match attempt {
        0 => match keywords.first() {
            Some(first) => format!("{subject} {first}"),
            None => subject.to_string(),
        },
        1 => subject.to_string(),
        2 => match keywords.get(1) {
            Some(second) => second.clone(),
            None if subject.contains(' ') => {
                subject.split_whitespace().next().unwrap_or(subject).to_string()
            }
            None => subject.to_string(),
        },
        n if !keywords.is_empty() => keywords[n as usize % keywords.len()].clone(),
        _ => subject.to_string(),
    }
}

/// Queries the image archive and keeps the hits not used elsewhere.
pub struct SearchNode {
    search: Arc<dyn ImageSearch>,
    max_results: usize,
}

impl SearchNode {
    pub fn new(search: Arc<dyn ImageSearch>, max_results: usize) -> Self {
        Self { search, max_results }
    }
}

#[async_trait::async_trait]
impl Node<SlideWorkflowState> for SearchNode {
    fn name(&self) -> &str {
        SEARCH
    }

    async fn execute(&self, state: &mut SlideWorkflowState, _ctx: &NodeContext) -> deck_graph::Result<()> {
        let position = state.position();
        state.emit(WorkflowEvent::SearchStarted {
            position,
            attempt: state.current_attempt + 1,
            subject: state.outline_item.subject.clone(),
        });

        let query = determine_search_query(&state.outline_item, state.current_attempt);
        state.record_search(&query);

        let results = match self.search.search(&query, self.max_results).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(position, query = %query, error = %e, "image search failed");
                state.emit(WorkflowEvent::SearchError { position, error: e.to_string() });
                Vec::new()
            }
        };
        state.current_candidates = state.filter_unused_candidates(results);

        state.emit(WorkflowEvent::SearchCompleted {
            position,
            query: query.clone(),
            result_count: state.current_candidates.len(),
            candidates: state
                .current_candidates
                .iter()
                .take(CANDIDATES_IN_EVENT)
                .map(|c| CandidateSummary {
                    nasa_id: c.nasa_id.clone(),
                    title: c.title.clone(),
                    thumbnail_url: c.thumbnail_url.clone(),
                })
                .collect(),
        });

        if !state.current_candidates.is_empty() {
            state.phase = Phase::Select;
            return Ok(());
        }

        state.next_attempt(Phase::Search, Phase::Done);
        if state.phase == Phase::Search {
            state.emit(WorkflowEvent::SearchRetry {
                position,
                message: format!(
                    "No results, trying simpler query (attempt {})",
                    state.current_attempt + 1
                ),
            });
        } else {
            tracing::info!(position, attempts = state.current_attempt, "no search results, giving up");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(subject: &str, keywords: &[&str]) -> SlideOutlineItem {
        SlideOutlineItem {
            position: 1,
            subject: subject.into(),
            topic: "t".into(),
            search_keywords: keywords.iter().map(|k| k.to_string()).collect(),
            purpose: "p".into(),
        }
    }

    #[test]
    fn test_query_escalation() {
        let rover = item("Curiosity Rover", &["Mars", "rover"]);
        assert_eq!(determine_search_query(&rover, 0), "Curiosity Rover Mars");
        assert_eq!(determine_search_query(&rover, 1), "Curiosity Rover");
        assert_eq!(determine_search_query(&rover, 2), "rover");
        assert_eq!(determine_search_query(&rover, 3), "rover");
        assert_eq!(determine_search_query(&rover, 4), "Mars");
    }

    #[test]
    fn test_query_without_keywords() {
        let bare = item("Space Shuttle", &[]);
        assert_eq!(determine_search_query(&bare, 0), "Space Shuttle");
        assert_eq!(determine_search_query(&bare, 2), "Space");
        assert_eq!(determine_search_query(&bare, 7), "Space Shuttle");

        let single = item("Hubble", &["galaxy"]);
        assert_eq!(determine_search_query(&single, 2), "Hubble");
        assert_eq!(determine_search_query(&single, 5), "galaxy");
    }

    #[test]
    fn test_first_word_needs_a_space() {
        assert_eq!(determine_search_query(&item("Apollo\t11", &[]), 2), "Apollo\t11");
        assert_eq!(determine_search_query(&item("Apollo 11\tlaunch", &[]), 2), "Apollo");
    }
}
