use std::collections::HashSet;

use tracing::info;

use crate::client::DynLlmClient;
use crate::completion::{self, AiCallError, CompletionSpec};
use crate::config::ModelSettings;

use super::prompt::{FALLBACK_SYSTEM_PROMPT, fallback_user_prompt};
use super::types::{ResourceExample, ResourceListPayload};
use super::usable_resources;

const FALLBACK_MAX_TOKENS: u32 = 1000;
const FALLBACK_TEMPERATURE: f32 = 0.3;

/// Asks for resources only, steering the model away from URLs already held.
pub async fn generate_fallback_resources(
    client: &DynLlmClient,
    topic: &str,
    resource_count: u32,
    existing: &[ResourceExample],
    models: &ModelSettings,
) -> Result<Vec<ResourceExample>, AiCallError> {
    let known: Vec<&str> = existing.iter().map(|resource| resource.url.as_str()).collect();
    let spec = CompletionSpec {
        system: FALLBACK_SYSTEM_PROMPT.to_string(),
        user: fallback_user_prompt(topic, resource_count, &known),
        max_tokens: FALLBACK_MAX_TOKENS,
        temperature: FALLBACK_TEMPERATURE,
    };

    let payload: ResourceListPayload =
        completion::complete_json(client, &models.chat, spec, models.max_tokens).await?;
    let resources = usable_resources(payload.examples, resource_count as usize);
    info!(resources = resources.len(), "fallback resources generated");
    Ok(resources)
}

/// Partial results first, then fallback additions, unique by URL, at most `target`.
pub fn merge_resources(
    partial: Vec<ResourceExample>,
    additions: Vec<ResourceExample>,
    target: usize,
) -> Vec<ResourceExample> {
    let mut seen = HashSet::new();
    partial
        .into_iter()
        .chain(additions)
        .filter(|resource| seen.insert(resource.url.trim().to_string()))
        .take(target)
        .collect()
}
