use anyhow::anyhow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENROUTER_BASE_URL};

#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmSettings,
    pub models: ModelSettings,
    pub server: ServerSettings,
    pub plan: PlanSettings,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub timeout_secs: u64,
    pub base_url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    OpenAi,
    OpenRouter,
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::OpenAi => write!(f, "openai"),
            LlmProvider::OpenRouter => write!(f, "openrouter"),
        }
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(LlmProvider::OpenAi),
            "openrouter" => Ok(LlmProvider::OpenRouter),
            other => Err(anyhow!("Unknown LLM provider '{other}'")),
        }
    }
}

impl LlmProvider {
    pub fn default_base_url(self) -> &'static str {
        match self {
            LlmProvider::OpenAi => DEFAULT_OPENAI_BASE_URL,
            LlmProvider::OpenRouter => DEFAULT_OPENROUTER_BASE_URL,
        }
    }

    pub fn api_key_env_var(self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "OPENAI_API_KEY",
            LlmProvider::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "OpenAI",
            LlmProvider::OpenRouter => "OpenRouter",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub chat: String,
    pub image: String,
    /// Upper bound on completion tokens for any single call.
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct PlanSettings {
    pub default_steps: u32,
    pub default_resources: u32,
    /// Below this many usable resources the fallback generator runs.
    pub min_usable_resources: usize,
}

// File configuration types
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileConfig {
    pub llm: FileLlmSettings,
    pub models: FileModelSettings,
    pub server: FileServerSettings,
    pub plan: FilePlanSettings,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileLlmSettings {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileModelSettings {
    pub chat: Option<String>,
    pub image: Option<String>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileServerSettings {
    pub bind: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FilePlanSettings {
    pub default_steps: Option<u32>,
    pub default_resources: Option<u32>,
    pub min_usable_resources: Option<usize>,
}

// Serialization helpers
#[derive(Serialize)]
pub(super) struct PersistedConfig<'a> {
    pub llm: PersistedLlm<'a>,
    pub models: PersistedModels<'a>,
    pub server: PersistedServer<'a>,
    pub plan: PersistedPlan,
}

#[derive(Serialize)]
pub(super) struct PersistedLlm<'a> {
    pub provider: LlmProvider,
    pub api_key: &'a str,
    pub timeout_secs: u64,
    pub base_url: &'a str,
    pub user_agent: &'a str,
}

#[derive(Serialize)]
pub(super) struct PersistedModels<'a> {
    pub chat: &'a str,
    pub image: &'a str,
    pub max_tokens: u32,
}

#[derive(Serialize)]
pub(super) struct PersistedServer<'a> {
    pub bind: &'a str,
    pub port: u16,
}

#[derive(Serialize)]
pub(super) struct PersistedPlan {
    pub default_steps: u32,
    pub default_resources: u32,
    pub min_usable_resources: usize,
}

impl<'a> From<&'a Config> for PersistedConfig<'a> {
    fn from(config: &'a Config) -> Self {
        PersistedConfig {
            llm: PersistedLlm {
                provider: config.llm.provider,
                api_key: &config.llm.api_key,
                timeout_secs: config.llm.timeout_secs,
                base_url: &config.llm.base_url,
                user_agent: &config.llm.user_agent,
            },
            models: PersistedModels {
                chat: &config.models.chat,
                image: &config.models.image,
                max_tokens: config.models.max_tokens,
            },
            server: PersistedServer {
                bind: &config.server.bind,
                port: config.server.port,
            },
            plan: PersistedPlan {
                default_steps: config.plan.default_steps,
                default_resources: config.plan.default_resources,
                min_usable_resources: config.plan.min_usable_resources,
            },
        }
    }
}
