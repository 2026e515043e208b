use serde::Serialize;

use crate::generator::{LearningPlan, ResourceExample};

/// Body of a successful `/api/learn` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearnResponse {
    pub plan: LearningPlan,
    pub examples: Vec<ResourceExample>,
    /// Set when resources are degraded; the plan itself is always complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
