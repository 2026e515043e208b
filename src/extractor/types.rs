use std::ops::RangeInclusive;

use serde::Deserialize;

use crate::parser::coerce;

/// What the extractor learned about one raw topic request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedParameters {
    pub clean_topic: String,
    pub requested_step_count: Option<u32>,
    pub requested_resource_count: Option<u32>,
    pub is_valid: bool,
    pub rejection_reason: Option<String>,
    pub count_is_reasonable: bool,
    /// Guidance naming the allowed range when a count is unreasonable.
    pub count_guidance: Option<String>,
}

/// Inclusive bounds for counts a user may ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountPolicy {
    pub steps: RangeInclusive<u32>,
    pub resources: RangeInclusive<u32>,
}

impl Default for CountPolicy {
    fn default() -> Self {
        Self {
            steps: 2..=15,
            resources: 1..=20,
        }
    }
}

impl CountPolicy {
    /// `None` when every requested count is in range, otherwise guidance.
    pub fn judge(&self, steps: Option<u32>, resources: Option<u32>) -> Option<String> {
        let mut problems = Vec::new();

        if let Some(requested) = steps.filter(|count| !self.steps.contains(count)) {
            problems.push(format!(
                "{requested} steps is not a reasonable plan size; please ask for between {} and {} steps",
                self.steps.start(),
                self.steps.end()
            ));
        }

        if let Some(requested) = resources.filter(|count| !self.resources.contains(count)) {
            problems.push(format!(
                "{requested} resources is not a reasonable amount; please ask for between {} and {} resources",
                self.resources.start(),
                self.resources.end()
            ));
        }

        if problems.is_empty() {
            None
        } else {
            Some(format!("{}.", capitalize(&problems.join(", and "))))
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Shape the model is asked to answer with.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ExtractionPayload {
    #[serde(deserialize_with = "coerce::string")]
    pub clean_topic: String,
    /// Outer `None` when the key is missing; `Some(None)` for an explicit null.
    #[serde(alias = "num_steps", alias = "requested_steps", deserialize_with = "coerce::stated_count")]
    pub step_count: Option<Option<u32>>,
    #[serde(
        alias = "num_resources",
        alias = "num_examples",
        alias = "requested_resources",
        deserialize_with = "coerce::stated_count"
    )]
    pub resource_count: Option<Option<u32>>,
    #[serde(deserialize_with = "coerce::flag")]
    pub is_valid: bool,
    #[serde(
        alias = "validation_message",
        alias = "reason",
        deserialize_with = "coerce::optional_string"
    )]
    pub rejection_reason: Option<String>,
}
