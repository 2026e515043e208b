//! Tolerant extraction of JSON objects from free-text model completions.
//!
//! Models wrap their answers in markdown fences, prefix them with prose, or
//! emit `<think>` reasoning blocks. Everything here is pure so it can be
//! tested without a network call.

pub mod coerce;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// A completion that did not contain a usable JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed AI response ({reason})")]
pub struct MalformedResponse {
    pub reason: String,
    pub raw: String,
}

impl MalformedResponse {
    fn new(reason: impl Into<String>, raw: &str) -> Self {
        Self {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }
}

fn strip_think_blocks(input: &str) -> String {
    let mut cleaned = input.to_string();

    while let Some(think_start) = cleaned.find("<think>") {
        if let Some(think_end_pos) = cleaned[think_start..].find("</think>") {
            let absolute_end = think_start + think_end_pos + "</think>".len();
            cleaned.replace_range(think_start..absolute_end, "");
        } else {
            cleaned.replace_range(think_start.., "");
            break;
        }
    }

    cleaned
}

fn strip_code_fences(input: &str) -> &str {
    let mut trimmed = input.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        // Drop the info string ("json", "JSON", ...) on the opening fence line.
        trimmed = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
        };
    }

    if let Some(rest) = trimmed.trim_end().strip_suffix("```") {
        trimmed = rest;
    }

    trimmed.trim()
}

/// Returns the slice between the first `{` and the last `}` of the
/// completion once fences and reasoning blocks are removed.
pub fn extract_json_object(input: &str) -> Option<String> {
    let cleaned = strip_think_blocks(input);
    let unfenced = strip_code_fences(&cleaned);

    let start = unfenced.find('{')?;
    let end = unfenced.rfind('}')?;
    if end < start {
        return None;
    }

    Some(unfenced[start..=end].to_string())
}

/// Parses a completion into `T`, tolerating surrounding prose and fences.
pub fn parse_response<T>(raw: &str) -> Result<T, MalformedResponse>
where
    T: DeserializeOwned,
{
    if raw.trim().is_empty() {
        return Err(MalformedResponse::new("empty response", raw));
    }

    let fragment = extract_json_object(raw)
        .ok_or_else(|| MalformedResponse::new("no JSON object found", raw))?;

    serde_json::from_str::<T>(&fragment)
        .map_err(|err| MalformedResponse::new(format!("invalid JSON: {err}"), raw))
}

#[cfg(test)]
mod tests;
