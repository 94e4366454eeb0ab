//! Logging setup and span helpers.
//!
//! ## Spans
//!
//! - `deck.planning` - outline generation
//! - `deck.slide` - image selection for one slide
//! - `deck.llm_request` - a single agent call
//!
//! Durations of longer operations are logged at debug level under the
//! `deck.timing` target by [`TimingGuard`].

use crate::config::{DebugLevel, TelemetryConfig};
use std::time::Instant;
use tracing::{Span, info_span};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise minimal and normal output only shows
/// errors so the terminal renderer stays readable, verbose adds warnings and
/// debug uses the configured level.
pub fn init(config: &TelemetryConfig, debug_level: DebugLevel) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let log_level = match debug_level {
        DebugLevel::Minimal | DebugLevel::Normal => "error",
        DebugLevel::Verbose => "warn",
        DebugLevel::Debug => config.log_level.as_str(),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(debug_level.is_debug()).with_writer(std::io::stderr))
        .with(filter)
        .try_init()?;

    Ok(())
}

/// Create a span for outline generation.
pub fn planning_span(agent: &str) -> Span {
    info_span!("deck.planning", otel.name = "Planning", agent = %agent, phase = "planning")
}

/// Create a span for one slide's workflow.
pub fn slide_span(position: u32, total: usize, subject: &str) -> Span {
    info_span!(
        "deck.slide",
        otel.name = "Slide Image Selection",
        position = %position,
        total = %total,
        subject = %subject,
        phase = "image_selection"
    )
}

/// Create a span for an agent call.
pub fn llm_request_span(agent: &str) -> Span {
    info_span!("deck.llm_request", otel.name = "LLM Request", agent = %agent)
}

/// Logs how long it lived when dropped.
pub struct TimingGuard {
    start: Instant,
    name: String,
}

impl TimingGuard {
    pub fn new(name: impl Into<String>) -> Self {
        Self { start: Instant::now(), name: name.into() }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        tracing::debug!(
            target: "deck.timing",
            name = %self.name,
            duration_ms = %self.elapsed_ms(),
            "Operation completed"
        );
    }
}

/// Start timing an operation.
pub fn start_timing(name: impl Into<String>) -> TimingGuard {
    TimingGuard::new(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_guard() {
        let guard = start_timing("outline");
        assert!(guard.elapsed_ms() < 60_000);
    }

    #[test]
    fn test_spans_without_subscriber() {
        let _planning = planning_span("PlannerAgent").entered();
        let _slide = slide_span(1, 5, "Apollo 11");
        let _llm = llm_request_span("JudgeAgent");
    }
}
