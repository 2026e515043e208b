//! Plan and resource generation.
//!
//! The primary call produces both the ordered plan and the resource list.
//! When it comes back short on usable resources the caller can make one
//! narrower [`generate_fallback_resources`] call.

mod fallback;
mod prompt;
mod types;

pub use fallback::{generate_fallback_resources, merge_resources};
pub use types::{GenerationOutcome, GenerationRequest, LearningPlan, ResourceExample, Step};

use std::collections::HashSet;

use thiserror::Error;
use tracing::{info, warn};

use crate::client::DynLlmClient;
use crate::completion::{self, AiCallError, CompletionSpec};
use crate::config::ModelSettings;

use prompt::{GENERATOR_SYSTEM_PROMPT, generation_user_prompt};
use types::{GenerationPayload, ResourcePayload};

const GENERATION_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Call(#[from] AiCallError),

    #[error("AI response contained no usable plan steps")]
    EmptyPlan,
}

/// One AI call producing the plan plus up to `resource_count` resources.
///
/// The plan is truncated to `step_count`. Resources are filtered to usable
/// ones, de-duplicated by URL and truncated; fewer than
/// `min(min_usable, resource_count)` survivors yields
/// [`GenerationOutcome::InsufficientResources`].
pub async fn generate_plan(
    client: &DynLlmClient,
    request: &GenerationRequest,
    models: &ModelSettings,
    min_usable: usize,
) -> Result<GenerationOutcome, GenerationError> {
    let spec = CompletionSpec {
        system: GENERATOR_SYSTEM_PROMPT.to_string(),
        user: generation_user_prompt(&request.topic, request.step_count, request.resource_count),
        max_tokens: models.max_tokens,
        temperature: GENERATION_TEMPERATURE,
    };

    let payload: GenerationPayload =
        completion::complete_json(client, &models.chat, spec, models.max_tokens).await?;

    let mut plan: LearningPlan = payload
        .plan
        .into_iter()
        .filter(|step| !step.title.is_empty())
        .map(Step::from)
        .collect();
    if plan.is_empty() {
        return Err(GenerationError::EmptyPlan);
    }
    if plan.len() > request.step_count as usize {
        warn!(
            produced = plan.len(),
            requested = request.step_count,
            "model over-produced steps; truncating"
        );
        plan.truncate(request.step_count as usize);
    }

    let target = request.resource_count as usize;
    let resources = usable_resources(payload.examples, target);
    let threshold = min_usable.min(target);

    info!(
        steps = plan.len(),
        resources = resources.len(),
        threshold,
        "plan generated"
    );

    if resources.len() < threshold {
        Ok(GenerationOutcome::InsufficientResources {
            plan,
            partial: resources,
        })
    } else {
        Ok(GenerationOutcome::Complete { plan, resources })
    }
}

/// Usable, URL-unique resources in their original order, at most `limit`.
pub(crate) fn usable_resources(raw: Vec<ResourcePayload>, limit: usize) -> Vec<ResourceExample> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(ResourceExample::from)
        .filter(|resource| resource.is_usable())
        .filter(|resource| seen.insert(resource.url.trim().to_string()))
        .take(limit)
        .collect()
}
