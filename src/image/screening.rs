//! Cheap local screening of image prompts, plus the short AI review used
//! when the heuristics cannot decide.

use tracing::{debug, warn};

use crate::client::DynLlmClient;
use crate::completion::{self, CompletionSpec};
use crate::config::ModelSettings;

const PLACEHOLDER_WORDS: &[&str] = &[
    "test", "dummy", "placeholder", "example", "sample", "asdf", "qwerty",
];
const ANIMATION_WORDS: &[&str] = &["gif", "animated", "animation", "moving", "video"];
const VISUAL_WORDS: &[&str] = &[
    "sunset", "sunrise", "night", "day", "city", "mountain", "ocean", "forest", "beach", "sky",
    "cloud", "star", "light", "dark", "color", "colour", "abstract", "pattern", "scene",
    "landscape", "portrait", "view", "background", "room", "interior", "exterior", "street",
    "garden", "lake", "river", "desert", "snow", "rain", "field", "space", "galaxy",
];
const WELL_KNOWN_NAMES: &[&str] = &[
    "elon", "musk", "taylor", "swift", "obama", "trump", "biden", "gates", "bezos", "zuckerberg",
];

const REVIEW_MAX_TOKENS: u32 = 30;
const REVIEW_TEMPERATURE: f32 = 0.1;

pub const PLACEHOLDER_MESSAGE: &str = "This doesn't describe a visual scene. Please describe what you want to see, like 'a sunset over mountains' or 'a cozy coffee shop'.";
pub const REPEATED_MESSAGE: &str =
    "Please provide a meaningful description, not just repeated characters.";
pub const ANIMATION_MESSAGE: &str = "Only static images can be generated, not animated GIFs or video. Describe the scene instead, like 'a boy dancing in the rain'.";
pub const NOT_VISUAL_MESSAGE: &str = "This doesn't describe a visual scene. Please describe what you want to see, like 'a sunset over mountains' or 'abstract geometric patterns'.";

/// Verdict of the local heuristics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screening {
    Rejected(String),
    Accepted,
    /// Neither clearly fine nor clearly wrong; ask the model.
    NeedsReview,
}

/// Lowercased alphanumeric tokens of the prompt.
fn tokens(prompt: &str) -> Vec<String> {
    prompt
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whole-word match, tolerating a plural `s`.
fn mentions(tokens: &[String], words: &[&str]) -> bool {
    tokens.iter().any(|token| {
        let singular = token.strip_suffix('s').unwrap_or(token.as_str());
        words.contains(&token.as_str()) || words.contains(&singular)
    })
}

pub fn screen(prompt: &str) -> Screening {
    let lowered = prompt.trim().to_lowercase();
    let tokens = tokens(&lowered);

    if lowered.split_whitespace().count() <= 2 && mentions(&tokens, PLACEHOLDER_WORDS) {
        return Screening::Rejected(PLACEHOLDER_MESSAGE.to_string());
    }

    let mut distinct: Vec<char> = lowered.chars().filter(|c| !c.is_whitespace()).collect();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() < 3 {
        return Screening::Rejected(REPEATED_MESSAGE.to_string());
    }

    if mentions(&tokens, ANIMATION_WORDS) {
        return Screening::Rejected(ANIMATION_MESSAGE.to_string());
    }

    if mentions(&tokens, VISUAL_WORDS) && !mentions(&tokens, WELL_KNOWN_NAMES) {
        return Screening::Accepted;
    }

    Screening::NeedsReview
}

/// Reads a `VALID` / `INVALID: reason` answer. `Some` carries the rejection;
/// anything unrecognised is accepted.
pub fn interpret_verdict(answer: &str) -> Option<String> {
    let trimmed = answer.trim().trim_matches(|c| c == '"' || c == '\'');
    let upper = trimmed.to_ascii_uppercase();
    if upper.starts_with("INVALID") {
        let reason = trimmed
            .get("INVALID".len()..)
            .unwrap_or_default()
            .trim_start_matches([':', '-', ' '])
            .trim();
        return Some(if reason.is_empty() {
            NOT_VISUAL_MESSAGE.to_string()
        } else {
            reason.to_string()
        });
    }
    None
}

fn review_prompt(prompt: &str) -> String {
    format!(
        "Is this a valid image prompt? \"{prompt}\"\n\nRespond ONLY:\n- \"VALID\" if it describes a visual scene or object (not abstract concepts or specific real people)\n- \"INVALID: <reason>\" if it is abstract, philosophical, or requests a specific real person\n\nResponse:"
    )
}

/// Asks the model to judge the prompt. Returns a rejection message, or `None`
/// to proceed; a failed review is lenient and lets generation decide.
pub async fn review(client: &DynLlmClient, prompt: &str, models: &ModelSettings) -> Option<String> {
    let spec = CompletionSpec {
        system: "Validate image prompts. Only approve visual scenes or objects. Reject abstract concepts or specific real people.".to_string(),
        user: review_prompt(prompt),
        max_tokens: REVIEW_MAX_TOKENS,
        temperature: REVIEW_TEMPERATURE,
    };

    match completion::complete_text(client, &models.chat, spec, models.max_tokens).await {
        Ok(answer) => {
            debug!(answer = %answer, "image prompt reviewed");
            interpret_verdict(&answer)
        }
        Err(err) => {
            warn!(error = %err, "image prompt review failed; accepting prompt");
            None
        }
    }
}
