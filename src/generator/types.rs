use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::parser::coerce;

/// One ordered unit of a learning plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub title: String,
    pub description: String,
}

/// Steps in pedagogical order; order is preserved end to end.
pub type LearningPlan = Vec<Step>;

/// An external reference supporting the topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceExample {
    pub title: String,
    pub url: String,
    pub description: String,
}

impl ResourceExample {
    /// A resource is usable with a title and an absolute http(s) URL.
    pub fn is_usable(&self) -> bool {
        if self.title.trim().is_empty() {
            return false;
        }
        Url::parse(self.url.trim())
            .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
            .unwrap_or(false)
    }
}

/// Input of the plan/resource generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub step_count: u32,
    pub resource_count: u32,
}

/// Result of the primary generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Complete {
        plan: LearningPlan,
        resources: Vec<ResourceExample>,
    },
    /// The plan is fine but too few usable resources came back.
    InsufficientResources {
        plan: LearningPlan,
        partial: Vec<ResourceExample>,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct StepPayload {
    #[serde(alias = "name", alias = "step", deserialize_with = "coerce::string")]
    pub title: String,
    #[serde(alias = "details", alias = "summary", deserialize_with = "coerce::string")]
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ResourcePayload {
    #[serde(alias = "name", deserialize_with = "coerce::string")]
    pub title: String,
    #[serde(alias = "link", alias = "href", deserialize_with = "coerce::string")]
    pub url: String,
    #[serde(alias = "summary", deserialize_with = "coerce::string")]
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GenerationPayload {
    #[serde(alias = "steps", alias = "learning_plan", deserialize_with = "coerce::entries")]
    pub plan: Vec<StepPayload>,
    #[serde(alias = "resources", deserialize_with = "coerce::entries")]
    pub examples: Vec<ResourcePayload>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ResourceListPayload {
    #[serde(alias = "resources", deserialize_with = "coerce::entries")]
    pub examples: Vec<ResourcePayload>,
}

impl From<StepPayload> for Step {
    fn from(payload: StepPayload) -> Self {
        Step {
            title: payload.title,
            description: payload.description,
        }
    }
}

impl From<ResourcePayload> for ResourceExample {
    fn from(payload: ResourcePayload) -> Self {
        ResourceExample {
            title: payload.title,
            url: payload.url,
            description: payload.description,
        }
    }
}
