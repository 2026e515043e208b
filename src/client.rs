use std::time::Duration;

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::{LlmProvider, LlmSettings};

/// Failures talking to the upstream AI provider.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request to the AI provider timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("{0}")]
    RateLimited(String),

    #[error("Invalid API key. Please check your API key configuration.")]
    Unauthorized,

    #[error("Content policy violation: {0}")]
    ContentPolicy(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("AI service is temporarily unavailable. Please try again later.")]
    Unavailable,

    #[error("API error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("Failed to reach the AI provider: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to decode AI provider response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Image response contained no image data")]
    MissingImage,
}

impl ClientError {
    pub fn is_content_policy(&self) -> bool {
        matches!(self, ClientError::ContentPolicy(_))
    }
}

/// Text-completion capability of the upstream provider.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ClientError>;
}

pub type DynLlmClient = dyn LlmClient;

/// Image-generation capability of the upstream provider.
#[async_trait]
pub trait ImageClient: Send + Sync {
    async fn generate_image(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<GeneratedImage, ClientError>;
}

pub type DynImageClient = dyn ImageClient;

#[derive(Debug, Clone)]
pub struct AIClient {
    http: Client,
    base_url: String,
    api_key: String,
    user_agent: String,
    provider: LlmProvider,
    timeout_secs: u64,
}

impl AIClient {
    pub fn new(settings: &LlmSettings) -> anyhow::Result<Self> {
        Self::with_base_url(settings, settings.base_url.clone())
    }

    pub fn with_base_url(settings: &LlmSettings, base_url: impl Into<String>) -> anyhow::Result<Self> {
        let sanitized_base = base_url.into().trim_end_matches('/').to_string();
        if sanitized_base.is_empty() {
            return Err(anyhow!("Base URL cannot be empty"));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: sanitized_base,
            api_key: settings.api_key.clone(),
            user_agent: settings.user_agent.clone(),
            provider: settings.provider,
            timeout_secs: settings.timeout_secs,
        })
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);

        let mut req_builder = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("User-Agent", &self.user_agent)
            .json(body);

        if matches!(self.provider, LlmProvider::OpenRouter) {
            req_builder = req_builder.header("X-Title", "learnkit");
        }

        let response = req_builder.send().await.map_err(|err| self.send_error(err))?;
        let status = response.status();
        debug!(%url, %status, "upstream responded");

        match status {
            StatusCode::OK => response.json::<R>().await.map_err(ClientError::Decode),
            StatusCode::TOO_MANY_REQUESTS => {
                let error_text = response.text().await.unwrap_or_default();
                let error_msg = if error_text.contains("per second") {
                    "Rate limit exceeded. Please wait a moment and try again."
                } else if error_text.contains("quota") {
                    "The AI provider quota has been exhausted. Please try again later."
                } else {
                    "Too many requests. Please wait before trying again."
                };
                Err(ClientError::RateLimited(format!(
                    "{error_msg} (API response: {error_text})"
                )))
            }
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            StatusCode::BAD_REQUEST => {
                let error_text = response.text().await.unwrap_or_default();
                if mentions_content_policy(&error_text) {
                    Err(ClientError::ContentPolicy(error_text))
                } else {
                    Err(ClientError::BadRequest(error_text))
                }
            }
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE => Err(ClientError::Unavailable),
            status => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(ClientError::Status {
                    status: status.as_u16(),
                    body: error_text,
                })
            }
        }
    }

    async fn fetch_image_bytes(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| self.send_error(err))?;

        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status().as_u16(),
                body: format!("failed to download generated image from {url}"),
            });
        }

        let bytes = response.bytes().await.map_err(ClientError::Decode)?;
        Ok(bytes.to_vec())
    }

    fn send_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            ClientError::Transport(err)
        }
    }
}

fn mentions_content_policy(body: &str) -> bool {
    let lowered = body.to_lowercase();
    lowered.contains("content_policy") || lowered.contains("safety") || lowered.contains("policy")
}

#[async_trait]
impl LlmClient for AIClient {
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ClientError> {
        debug!(model = %request.model, messages = request.messages.len(), "sending chat completion");
        let response: ChatCompletionResponse = self.post_json("chat/completions", &request).await?;
        if let Some(choice) = response.choices.first() {
            debug!(content = %choice.message.content, "chat completion received");
        }
        Ok(response)
    }
}

#[async_trait]
impl ImageClient for AIClient {
    async fn generate_image(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<GeneratedImage, ClientError> {
        debug!(model = %request.model, "sending image generation");
        let response: ImageGenerationResponse =
            self.post_json("images/generations", &request).await?;

        let image = response
            .data
            .into_iter()
            .next()
            .ok_or(ClientError::MissingImage)?;

        if let Some(encoded) = image.b64_json.filter(|value| !value.is_empty()) {
            return Ok(GeneratedImage::from_base64(encoded));
        }

        let url = image.url.ok_or(ClientError::MissingImage)?;
        let bytes = self.fetch_image_bytes(&url).await?;
        Ok(GeneratedImage::from_base64(BASE64.encode(bytes)))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatMessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatMessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatMessageRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub size: String,
    pub quality: String,
    pub n: u8,
    pub response_format: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Clone, Deserialize)]
struct ImageData {
    url: Option<String>,
    b64_json: Option<String>,
}

/// A generated image, already inlined as a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub data_url: String,
}

impl GeneratedImage {
    pub fn from_base64(encoded: impl AsRef<str>) -> Self {
        Self {
            data_url: format!("data:image/png;base64,{}", encoded.as_ref()),
        }
    }

    /// Decoded PNG bytes, when the data URL carries base64 content.
    pub fn png_bytes(&self) -> Option<Vec<u8>> {
        let (_, encoded) = self.data_url.split_once("base64,")?;
        BASE64.decode(encoded).ok()
    }
}
