use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::client::{ChatCompletionRequest, ChatMessage, ClientError, DynLlmClient};
use crate::parser::{self, MalformedResponse};

/// Failure of a single prompt → structured-answer round trip.
#[derive(Debug, Error)]
pub enum AiCallError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("AI response contained no choices")]
    NoChoices,

    #[error("AI response was empty")]
    Empty,

    #[error(transparent)]
    Malformed(#[from] MalformedResponse),
}

/// One system + user prompt pair sent to the chat model.
#[derive(Debug, Clone)]
pub struct CompletionSpec {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Sends the prompt and returns the raw completion text.
pub async fn complete_text(
    client: &DynLlmClient,
    model: &str,
    spec: CompletionSpec,
    token_ceiling: u32,
) -> Result<String, AiCallError> {
    let request = ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::system(spec.system), ChatMessage::user(spec.user)],
        max_tokens: Some(spec.max_tokens.min(token_ceiling).max(1)),
        temperature: Some(spec.temperature),
    };

    let response = client.chat_completion(request).await?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(AiCallError::NoChoices)?;

    let content = choice.message.content.trim().to_string();
    if content.is_empty() {
        return Err(AiCallError::Empty);
    }

    debug!(finish_reason = ?choice.finish_reason, chars = content.len(), "completion text ready");
    Ok(content)
}

/// Sends the prompt and parses the completion into `T`.
pub async fn complete_json<T>(
    client: &DynLlmClient,
    model: &str,
    spec: CompletionSpec,
    token_ceiling: u32,
) -> Result<T, AiCallError>
where
    T: DeserializeOwned,
{
    let content = complete_text(client, model, spec, token_ceiling).await?;
    Ok(parser::parse_response::<T>(&content)?)
}
