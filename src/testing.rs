//! Test doubles shared by the module tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatMessageRole,
    ClientError, GeneratedImage, ImageClient, ImageGenerationRequest, LlmClient,
};
use crate::config::{Config, LlmProvider};

pub fn sample_config() -> Config {
    Config::builder()
        .with_llm(|llm| {
            llm.provider = LlmProvider::OpenAi;
            llm.api_key = "test-key".to_string();
            llm.timeout_secs = 30;
            llm.base_url = "https://api.openai.com/v1".to_string();
            llm.user_agent = "learnkit/test".to_string();
        })
        .with_models(|models| {
            models.chat = "gpt-4o-mini".to_string();
            models.max_tokens = 2048;
        })
        .build()
        .unwrap()
}

/// Chat client that replays queued completions in order and records every
/// request it receives. An exhausted queue answers `Unavailable`.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, ClientError>>>,
    requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let client = Self::new();
        for reply in replies {
            client.push_reply(reply);
        }
        client
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    pub fn push_json(&self, value: Value) {
        self.push_reply(value.to_string());
    }

    pub fn push_error(&self, error: ClientError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// User-role content of the `index`-th request.
    pub fn user_prompt(&self, index: usize) -> String {
        self.requests.lock().unwrap()[index]
            .messages
            .iter()
            .find(|message| message.role == ChatMessageRole::User)
            .map(|message| message.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ClientError> {
        self.requests.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ClientError::Unavailable))?;

        Ok(ChatCompletionResponse {
            choices: vec![ChatChoice {
                message: ChatMessage {
                    role: ChatMessageRole::Assistant,
                    content: reply,
                },
                finish_reason: Some("stop".to_string()),
            }],
        })
    }
}

/// Image client with a single canned outcome.
pub struct ScriptedImageClient {
    outcome: Mutex<Option<Result<GeneratedImage, ClientError>>>,
    requests: Mutex<Vec<ImageGenerationRequest>>,
}

impl ScriptedImageClient {
    pub fn succeeding(encoded: &str) -> Self {
        Self {
            outcome: Mutex::new(Some(Ok(GeneratedImage::from_base64(encoded)))),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ClientError) -> Self {
        Self {
            outcome: Mutex::new(Some(Err(error))),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageClient for ScriptedImageClient {
    async fn generate_image(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<GeneratedImage, ClientError> {
        self.requests.lock().unwrap().push(request);
        self.outcome
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Err(ClientError::Unavailable))
    }
}
