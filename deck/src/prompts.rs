//! Agent instructions and per-phase prompt builders.

use crate::models::{ImageSelection, NasaImage, PresentationOutline, SlideOutlineItem};
use crate::nasa::format_images_summary;
use crate::state::AttemptRecord;

pub const PLANNER_NAME: &str = "PlannerAgent";
pub const RESEARCHER_NAME: &str = "ResearcherAgent";
pub const REVIEWER_NAME: &str = "ReviewerAgent";
pub const JUDGE_NAME: &str = "JudgeAgent";

pub const PLANNER_INSTRUCTIONS: &str = r#"You are an expert presentation architect specializing in NASA and space exploration topics.

Create a structured outline for a visual presentation built from NASA's image archive:
1. Define a clear narrative arc for the topic.
2. Specify 5-8 slides that build a coherent visual story.
3. For each slide, describe the subject and the aspect to highlight.
4. Provide search keywords for finding a NASA image for each slide.

Focus on visual storytelling. Vary the slides: different angles, mission phases, people, hardware and locations. Be specific about the kind of image that would work.

SEARCH KEYWORDS:
The archive search works best with one or two word queries.
Good: "Mars rover", "Saturn rings", "Apollo 11", "Hubble galaxy", "astronaut EVA"
Bad: "Mercury surface Mariner 10 Mercury craters" (too long), "beautiful galaxy image" (vague)
Every keyword must be 1-2 words.

Slide positions start at 1."#;

pub const RESEARCHER_INSTRUCTIONS: &str = r#"You are a NASA image research specialist. Find the BEST matching image for one slide.

You receive the slide requirement, the presentation context and a numbered list of search results from NASA's image archive. Select exactly ONE image.

Selection criteria, in order of importance:
1. RELEVANCE: the image directly shows what the slide needs.
2. VISUAL QUALITY: striking and clear enough for a presentation.
3. AUTHENTICITY: prefer real photos over illustrations unless the topic needs a concept.
4. UNIQUENESS: avoid generic shots when a specific moment or feature is required.

Check titles, descriptions and keywords for relevance. Copy the NASA ID exactly as listed. Leave thumbnail_url null."#;

pub const REVIEWER_INSTRUCTIONS: &str = r#"You are a STRICT visual content reviewer for NASA-themed presentations.

Verify that the selected image ACTUALLY SHOWS what the slide topic requires. The topic describes exactly the visual content needed.

Examples:
- Topic "Mars as the red circular planet": approve a full disc view; reject a rover surface closeup or a partial orbital view.
- Topic "Surface features and craters": approve a terrain closeup; reject a distant view of the planet as a dot.
- Topic "Astronaut on the Moon": approve a photo of an astronaut on the lunar surface; reject spacecraft or footprints alone.

Evaluate:
1. VISUAL MATCH: "as a circle" means full disc, "surface" means closeup terrain, "rings" means rings visible.
2. ACCURACY: correct mission, spacecraft or body.
3. QUALITY: suitable for a presentation.

Reject when the perspective differs from the topic, the image is from the wrong mission or era, or it does not demonstrate the topic.

When rejecting, give a search_suggestion of 2-3 words (for example "Mars full disc" or "Saturn rings Cassini"); otherwise null. List concrete visual problems in issues."#;

pub const JUDGE_INSTRUCTIONS: &str = r#"You are a fair judge who picks the best available option from imperfect candidates.

The workflow tried several images without finding a perfect match. Select the LEAST PROBLEMATIC image among the attempted ones, considering:
1. Which image has the fewest issues?
2. Which is closest to the intended topic?
3. Which would look best in the final presentation?

You MUST select one image. Use the NASA ID exactly as listed."#;

/// Prompt for the planner.
pub fn outline_prompt(request: &str) -> String {
    format!(
        "Create a presentation outline for the following request:\n\n{request}\n\n\
         Remember:\n\
         - Include 5-8 slides\n\
         - Each slide should focus on one aspect that can be illustrated with a NASA image\n\
         - Provide specific search keywords for each slide"
    )
}

/// Prompt for the researcher: requirement, candidates and earlier rejections.
pub fn selection_prompt(
    outline: &PresentationOutline,
    item: &SlideOutlineItem,
    candidates: &[NasaImage],
    max_candidates: usize,
    history: &[AttemptRecord],
) -> String {
    let mut prompt = format!(
        "PRESENTATION: {}\nNarrative: {}\n\n\
         SLIDE REQUIREMENT:\n\
         Position: {} of {}\n\
         Subject: {}\n\
         Topic: {}\n\
         Purpose: {}\n\
         Search Keywords: {}\n\n\
         CANDIDATE IMAGES:\n{}\n\n\
         Select the BEST matching image for this slide.",
        outline.title,
        outline.narrative,
        item.position,
        outline.slide_count(),
        item.subject,
        item.topic,
        item.purpose,
        item.search_keywords.join(", "),
        format_images_summary(candidates, max_candidates),
    );

    if !history.is_empty() {
        prompt.push_str("\n\nPREVIOUS ATTEMPTS (avoid these issues):");
        for record in history {
            prompt.push_str(&format!("\n- {}: {}", record.selected.title, record.feedback));
        }
    }

    prompt
}

/// Prompt for the reviewer. `image` is the candidate matching the selection, if any.
pub fn review_prompt(
    outline: &PresentationOutline,
    item: &SlideOutlineItem,
    selection: &ImageSelection,
    image: Option<&NasaImage>,
    previous_searches: &[String],
) -> String {
    let description = image.map_or("No description available", |img| img.description.as_str());
    let keywords = image.map_or_else(|| "None".to_string(), |img| img.keywords.join(", "));

    let previous = if previous_searches.is_empty() {
        String::new()
    } else {
        format!(
            "\n\nPREVIOUS SEARCHES (do NOT suggest these again):\n- {}",
            previous_searches.join("\n- ")
        )
    };

    format!(
        "PRESENTATION: {title}\n\n\
         === SLIDE REQUIREMENT (MUST MATCH) ===\n\
         Position: {position}\n\
         Subject: {subject}\n\
         Topic: {topic}\n\
         Purpose: {purpose}\n\n\
         === CRITICAL VALIDATION ===\n\
         The slide topic says: \"{topic}\"\n\
         You MUST verify the image actually SHOWS this content.\n\n\
         For example:\n\
         - If topic says \"as a circle/sphere\" → image must show full disc view, NOT surface closeup\n\
         - If topic says \"surface features\" → image must show surface, NOT distant view\n\
         - If topic says \"astronaut\" → must show actual astronaut, not just spacecraft\n\n\
         === SELECTED IMAGE ===\n\
         NASA ID: {nasa_id}\n\
         Title: {image_title}\n\
         Description: {description}\n\
         Keywords: {keywords}\n\
         Selection Reason: {reason}{previous}\n\n\
         === YOUR TASK ===\n\
         Carefully verify: Does this image VISUALLY match what \"{topic}\" requires?\n\
         Be STRICT - reject if the visual content doesn't match the topic description.",
        title = outline.title,
        position = item.position,
        subject = item.subject,
        topic = item.topic,
        purpose = item.purpose,
        nasa_id = selection.nasa_id,
        image_title = selection.title,
        reason = selection.reason,
    )
}

/// Prompt for the judge, listing every reviewed attempt.
pub fn judge_prompt(item: &SlideOutlineItem, history: &[AttemptRecord]) -> String {
    let candidates = history
        .iter()
        .enumerate()
        .map(|(i, record)| {
            format!(
                "CANDIDATE {}: {}\n  Title: {}\n  Original Reason: {}\n  Feedback: {}",
                i + 1,
                record.selected.nasa_id,
                record.selected.title,
                record.selected.reason,
                record.feedback
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "SLIDE REQUIREMENT:\nSubject: {}\nTopic: {}\nPurpose: {}\n\n\
         ATTEMPTED IMAGES:\n{candidates}\n\n\
         Pick the BEST image from these options (the least problematic one).\n\
         You MUST select one - do not reject all options.",
        item.subject, item.topic, item.purpose
    )
}
