//! Topic/parameter extraction: one AI call that cleans the topic, pulls out
//! requested counts, and judges whether the topic is learnable.

mod counts;
mod prompt;
mod types;

pub use counts::{scan_resource_count, scan_step_count};
pub use types::{CountPolicy, ExtractedParameters};

use tracing::{debug, info};

use crate::client::DynLlmClient;
use crate::completion::{self, AiCallError, CompletionSpec};
use crate::config::ModelSettings;

use prompt::{EXTRACTOR_SYSTEM_PROMPT, extraction_user_prompt};
use types::ExtractionPayload;

const EXTRACTION_MAX_TOKENS: u32 = 200;
const EXTRACTION_TEMPERATURE: f32 = 0.1;

pub const DEFAULT_REJECTION: &str = "This doesn't seem like a valid learning topic. Please enter a specific subject, skill, or concept you want to learn.";

impl ExtractedParameters {
    /// The user-facing reason this request cannot proceed, if any.
    ///
    /// An unreasonable count rejects the whole request even when the topic
    /// itself is fine.
    pub fn rejection(&self) -> Option<String> {
        if !self.is_valid {
            return Some(
                self.rejection_reason
                    .clone()
                    .unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
            );
        }
        if !self.count_is_reasonable {
            return self.count_guidance.clone();
        }
        None
    }
}

pub async fn extract_parameters(
    client: &DynLlmClient,
    raw_topic: &str,
    models: &ModelSettings,
    policy: &CountPolicy,
) -> Result<ExtractedParameters, AiCallError> {
    let trimmed = raw_topic.trim();
    let spec = CompletionSpec {
        system: EXTRACTOR_SYSTEM_PROMPT.to_string(),
        user: extraction_user_prompt(trimmed),
        max_tokens: EXTRACTION_MAX_TOKENS,
        temperature: EXTRACTION_TEMPERATURE,
    };

    let payload: ExtractionPayload =
        completion::complete_json(client, &models.chat, spec, models.max_tokens).await?;
    debug!(?payload, "extraction payload parsed");

    let parameters = interpret(payload, trimmed, policy);
    info!(
        topic = %parameters.clean_topic,
        valid = parameters.is_valid,
        steps = ?parameters.requested_step_count,
        resources = ?parameters.requested_resource_count,
        "topic extracted"
    );
    Ok(parameters)
}

fn interpret(payload: ExtractionPayload, raw_topic: &str, policy: &CountPolicy) -> ExtractedParameters {
    let clean_topic = if payload.clean_topic.is_empty() {
        raw_topic.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        payload.clean_topic
    };

    // An explicit null means the model saw no request; only a missing key
    // falls back to scanning the raw input.
    let requested_step_count = payload
        .step_count
        .unwrap_or_else(|| scan_step_count(raw_topic));
    let requested_resource_count = payload
        .resource_count
        .unwrap_or_else(|| scan_resource_count(raw_topic));

    let count_guidance = policy.judge(requested_step_count, requested_resource_count);

    ExtractedParameters {
        clean_topic,
        requested_step_count,
        requested_resource_count,
        is_valid: payload.is_valid,
        rejection_reason: if payload.is_valid {
            None
        } else {
            payload.rejection_reason
        },
        count_is_reasonable: count_guidance.is_none(),
        count_guidance,
    }
}
