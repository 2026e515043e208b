use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::parser::coerce;

pub const MAX_TOPIC_CHARS: usize = 200;
pub const MAX_STEP_TITLE_CHARS: usize = 300;
pub const MAX_STEP_DESCRIPTION_CHARS: usize = 4000;

/// The step the caller wants elaborated, resupplied in full on every call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StepReference {
    pub topic: String,
    pub step_title: String,
    pub step_description: String,
    #[serde(default)]
    pub step_index: Option<usize>,
    #[serde(default)]
    pub step_count: Option<usize>,
}

impl StepReference {
    pub fn new(topic: &str, step_title: &str, step_description: &str) -> Self {
        Self {
            topic: topic.to_string(),
            step_title: step_title.to_string(),
            step_description: step_description.to_string(),
            step_index: None,
            step_count: None,
        }
    }

    pub fn at(mut self, index: usize, count: usize) -> Self {
        self.step_index = Some(index);
        self.step_count = Some(count);
        self
    }

    /// Rejects references that cannot name a real plan step.
    pub fn check(&self) -> Result<(), ServiceError> {
        require("topic", &self.topic, MAX_TOPIC_CHARS)?;
        require("step_title", &self.step_title, MAX_STEP_TITLE_CHARS)?;
        require("step_description", &self.step_description, MAX_STEP_DESCRIPTION_CHARS)?;

        match (self.step_index, self.step_count) {
            (Some(index), Some(count)) if index >= count => {
                Err(ServiceError::StepOutOfRange { index, count })
            }
            _ => Ok(()),
        }
    }
}

fn require(field: &str, value: &str, max_chars: usize) -> Result<(), ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::MalformedRequest(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > max_chars {
        return Err(ServiceError::MalformedRequest(format!(
            "{field} is too long (max {max_chars} characters)"
        )));
    }
    Ok(())
}

/// Richer material for one plan step. Every field is always serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedStep {
    pub additional_context: Option<String>,
    pub practical_details: Vec<String>,
    pub important_considerations: Vec<String>,
    pub real_world_examples: Vec<String>,
    pub potential_challenges: Vec<String>,
}

impl ExpandedStep {
    pub fn is_empty(&self) -> bool {
        self.additional_context.is_none()
            && self.practical_details.is_empty()
            && self.important_considerations.is_empty()
            && self.real_world_examples.is_empty()
            && self.potential_challenges.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ExpansionPayload {
    #[serde(alias = "additionalContext", alias = "context", deserialize_with = "coerce::optional_string")]
    pub additional_context: Option<String>,
    #[serde(alias = "practicalDetails", deserialize_with = "coerce::string_list")]
    pub practical_details: Vec<String>,
    #[serde(alias = "importantConsiderations", deserialize_with = "coerce::string_list")]
    pub important_considerations: Vec<String>,
    #[serde(alias = "realWorldExamples", alias = "examples", deserialize_with = "coerce::string_list")]
    pub real_world_examples: Vec<String>,
    #[serde(alias = "potentialChallenges", alias = "challenges", deserialize_with = "coerce::string_list")]
    pub potential_challenges: Vec<String>,
}

impl From<ExpansionPayload> for ExpandedStep {
    fn from(payload: ExpansionPayload) -> Self {
        ExpandedStep {
            additional_context: payload.additional_context,
            practical_details: payload.practical_details,
            important_considerations: payload.important_considerations,
            real_world_examples: payload.real_world_examples,
            potential_challenges: payload.potential_challenges,
        }
    }
}
