use super::constants::*;
use super::types::{LlmProvider, LlmSettings, ModelSettings, PlanSettings, ServerSettings};

pub fn default_user_agent() -> String {
    format!("learnkit/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for LlmSettings {
    fn default() -> Self {
        let provider = LlmProvider::OpenAi;
        Self {
            provider,
            api_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: provider.default_base_url().to_string(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            chat: DEFAULT_CHAT_MODEL.to_string(),
            image: DEFAULT_IMAGE_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            default_steps: DEFAULT_STEP_COUNT,
            default_resources: DEFAULT_RESOURCE_COUNT,
            min_usable_resources: DEFAULT_MIN_USABLE_RESOURCES,
        }
    }
}
