//! "Dive deeper": elaborates one previously generated plan step.
//!
//! Stateless; the caller resupplies the step content on every call.

mod prompt;
mod types;

pub use types::{ExpandedStep, StepReference};

use tracing::{info, warn};

use crate::client::DynLlmClient;
use crate::completion::{self, CompletionSpec};
use crate::config::ModelSettings;
use crate::error::ServiceError;

use prompt::{EXPANDER_SYSTEM_PROMPT, expansion_user_prompt};
use types::ExpansionPayload;

const EXPANSION_MAX_TOKENS: u32 = 1500;
const EXPANSION_TEMPERATURE: f32 = 0.7;

pub const EXPANSION_FAILED: &str = "Could not expand this step right now. Please try again.";

/// Checks the reference, then makes exactly one AI call.
pub async fn expand_step(
    client: &DynLlmClient,
    reference: &StepReference,
    models: &ModelSettings,
) -> Result<ExpandedStep, ServiceError> {
    reference.check()?;

    let position = reference.step_index.zip(reference.step_count);
    let spec = CompletionSpec {
        system: EXPANDER_SYSTEM_PROMPT.to_string(),
        user: expansion_user_prompt(
            &reference.topic,
            &reference.step_title,
            &reference.step_description,
            position,
        ),
        max_tokens: EXPANSION_MAX_TOKENS,
        temperature: EXPANSION_TEMPERATURE,
    };

    let payload: ExpansionPayload =
        completion::complete_json(client, &models.chat, spec, models.max_tokens)
            .await
            .map_err(|err| {
                warn!(error = %err, step = %reference.step_title, "step expansion failed");
                ServiceError::upstream(EXPANSION_FAILED)
            })?;

    let expanded = ExpandedStep::from(payload);
    if expanded.is_empty() {
        warn!(step = %reference.step_title, "step expansion came back empty");
        return Err(ServiceError::upstream(EXPANSION_FAILED));
    }

    info!(
        step = %reference.step_title,
        details = expanded.practical_details.len(),
        "step expanded"
    );
    Ok(expanded)
}

#[cfg(test)]
mod tests;
