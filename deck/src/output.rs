//! Terminal rendering of workflow events.
//!
//! ## Debug Levels
//!
//! - `Minimal`: errors and the finished slideshow
//! - `Normal`: phases, the outline and one line per slide (default)
//! - `Verbose`: every search, selection, review and judge step
//! - `Debug`: verbose output plus candidate lists and review issues

use crate::config::DebugLevel;
use crate::events::{RunPhase, WorkflowEvent};
use crate::models::{FinalSlide, NasaImage, PresentationOutline, Slideshow};
use crate::nasa::format_image_for_display;
use colored::Colorize;

/// Prints events and results at a chosen level of detail.
#[derive(Debug, Clone)]
pub struct DeckOutput {
    level: DebugLevel,
}

impl Default for DeckOutput {
    fn default() -> Self {
        Self::new(DebugLevel::Normal)
    }
}

impl DeckOutput {
    pub fn new(level: DebugLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> DebugLevel {
        self.level
    }

    /// Print whatever `event` renders to at this level.
    pub fn render(&self, event: &WorkflowEvent) {
        for line in self.lines(event) {
            println!("{line}");
        }
    }

    /// Lines for `event`; empty when the level hides it.
    pub fn lines(&self, event: &WorkflowEvent) -> Vec<String> {
        let normal = self.level.is_normal();
        let verbose = self.level.is_verbose();
        let debug = self.level.is_debug();

        match event {
            WorkflowEvent::Error { phase, message } => {
                vec![format!("{} {} failed: {}", "✗".bright_red(), phase_label(*phase), message.red())]
            }
            WorkflowEvent::Phase { message, .. } if normal => {
                vec![format!("\n{} {}", "▶".bright_cyan(), message.bright_white().bold())]
            }
            WorkflowEvent::OutlineReady { title, narrative, slides } if normal => {
                let mut lines = vec![
                    format!("  {} {}", "✓".bright_green(), title.green().bold()),
                    format!("    {}", narrative.italic()),
                ];
                lines.extend(slides.iter().map(|s| {
                    format!("    {} {}. {} - {}", "─".bright_black(), s.position, s.subject, s.topic)
                }));
                lines
            }
            WorkflowEvent::SlideStarted { position, subject, topic, total } if normal => {
                vec![format!(
                    "\n  {} {} {} - {}",
                    "→".bright_blue(),
                    format!("[{position}/{total}]").cyan(),
                    subject.bold(),
                    topic
                )]
            }

            WorkflowEvent::SearchStarted { attempt, subject, .. } if verbose => {
                vec![format!("    {} search attempt {attempt} for {subject}", "•".bright_black())]
            }
            WorkflowEvent::SearchCompleted { query, result_count, candidates, .. } if verbose => {
                let mut lines =
                    vec![format!("    {} \"{query}\" → {result_count} unused results", "•".bright_black())];
                if debug {
                    lines.extend(candidates.iter().map(|c| {
                        format!("      {} [{}] {}", "─".bright_black(), c.nasa_id, c.title)
                    }));
                }
                lines
            }
            WorkflowEvent::SearchRetry { message, .. } if verbose => {
                vec![format!("    {} {}", "↻".yellow(), message.yellow())]
            }
            WorkflowEvent::SearchError { error, .. } if verbose => {
                vec![format!("    {} search error: {}", "!".yellow(), error)]
            }
            WorkflowEvent::SelectionStarted { candidate_count, .. } if verbose => {
                vec![format!("    {} choosing among {candidate_count} candidates", "•".bright_black())]
            }
            WorkflowEvent::ImageSelected { nasa_id, title, reason, .. } if verbose => {
                let mut lines = vec![format!("    {} selected [{}] {}", "•".bright_black(), nasa_id.cyan(), title)];
                if debug {
                    lines.push(format!("      {}", reason.bright_black()));
                }
                lines
            }
            WorkflowEvent::SelectionError { error, .. } if verbose => {
                vec![format!("    {} selection error: {}", "!".yellow(), error)]
            }
            WorkflowEvent::ReviewStarted { nasa_id, .. } if verbose => {
                vec![format!("    {} reviewing {}", "•".bright_black(), nasa_id)]
            }
            WorkflowEvent::ReviewCompleted { approved, feedback, issues, search_suggestion, .. } if verbose => {
                let verdict = if *approved { "approved".green() } else { "rejected".red() };
                let mut lines = vec![format!("    {} {verdict}: {feedback}", "•".bright_black())];
                if debug {
                    lines.extend(issues.iter().map(|i| format!("      {} {i}", "─".bright_black())));
                    if let Some(suggestion) = search_suggestion {
                        lines.push(format!("      {} try \"{suggestion}\"", "─".bright_black()));
                    }
                }
                lines
            }
            WorkflowEvent::ReviewError { error, .. } if verbose => {
                vec![format!("    {} review error: {}", "!".yellow(), error)]
            }
            WorkflowEvent::JudgeStarted { attempt_count, .. } if verbose => {
                vec![format!("    {} judging {attempt_count} attempts", "⚖".magenta())]
            }
            WorkflowEvent::JudgeError { error, .. } if verbose => {
                vec![format!("    {} judge error, using first attempt: {}", "!".yellow(), error)]
            }

            WorkflowEvent::JudgeSelected { nasa_id, title, .. } if normal => {
                vec![format!("    {} judge picked [{}] {}", "⚖".magenta(), nasa_id.cyan(), title)]
            }
            WorkflowEvent::IterationLimit { steps, .. } if normal => {
                vec![format!("    {} stopped after {steps} workflow steps", "!".yellow())]
            }
            WorkflowEvent::SlideSelected { nasa_id, title, .. } if normal => {
                vec![format!("  {} [{}] {}", "✓".bright_green(), nasa_id.cyan(), title.green())]
            }
            WorkflowEvent::SlideFailed { message, .. } if normal => {
                vec![format!("  {} {}", "✗".bright_red(), message.red())]
            }
            WorkflowEvent::SlideshowComplete { title, total_slides, .. } => {
                vec![format!(
                    "\n{} {} ({total_slides} slides)",
                    "✓".bright_green().bold(),
                    title.bright_white().bold()
                )]
            }
            _ => Vec::new(),
        }
    }

    /// Print an outline produced by `deck outline`.
    pub fn print_outline(&self, outline: &PresentationOutline) {
        println!("{}", outline.title.bright_white().bold());
        println!("{}\n", outline.narrative.italic());
        for slide in &outline.slides {
            println!("{} {}", format!("{}.", slide.position).cyan(), slide.subject.bold());
            println!("   Topic: {}", slide.topic);
            println!("   Purpose: {}", slide.purpose);
            println!("   Keywords: {}", slide.search_keywords.join(", "));
        }
    }

    /// Print the slides of a finished slideshow.
    pub fn print_slideshow(&self, slideshow: &Slideshow) {
        if !self.level.is_normal() {
            return;
        }
        for slide in &slideshow.slides {
            println!("{}", slide_line(slide));
        }
    }

    /// Print search results for `deck search`.
    pub fn print_images(&self, images: &[NasaImage]) {
        if images.is_empty() {
            println!("{}", "No images found.".yellow());
            return;
        }
        for (i, image) in images.iter().enumerate() {
            println!("{} {}\n", format!("{}.", i + 1).cyan(), format_image_for_display(image));
        }
    }
}

fn phase_label(phase: RunPhase) -> &'static str {
    match phase {
        RunPhase::Planning => "Planning",
        RunPhase::ImageSelection => "Image selection",
        RunPhase::Complete => "Completion",
    }
}

fn slide_line(slide: &FinalSlide) -> String {
    format!(
        "  {}. {} - {}\n     [{}] {}\n     {}",
        slide.position,
        slide.subject,
        slide.topic,
        slide.image.nasa_id,
        slide.image.title,
        slide.thumbnail_url.as_deref().unwrap_or("(no thumbnail)")
    )
}
