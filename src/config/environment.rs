use anyhow::{Context, Result, anyhow};
use std::env;
use std::str::FromStr;

use super::builder::ConfigBuilder;
use super::types::LlmProvider;

pub fn apply_env_overrides(mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
    if let Some(provider_raw) = env_string("LEARNKIT_PROVIDER")? {
        let provider = provider_raw
            .parse::<LlmProvider>()
            .with_context(|| format!("Failed to parse LEARNKIT_PROVIDER value '{provider_raw}'"))?;
        builder = builder.with_llm(|llm| {
            if llm.provider != provider {
                llm.provider = provider;
                llm.base_url = provider.default_base_url().to_string();
            }
        });
    }

    if let Some(base_url) = env_string("LEARNKIT_LLM_BASE_URL")? {
        builder = builder.with_llm(|llm| llm.base_url = base_url);
    }

    for provider in [LlmProvider::OpenAi, LlmProvider::OpenRouter] {
        if let Some(api_key) = env_string(provider.api_key_env_var())? {
            builder = builder.with_llm(|llm| {
                if llm.provider == provider {
                    llm.api_key = api_key;
                }
            });
        }
    }

    if let Some(timeout) = env_parse::<u64>("LEARNKIT_TIMEOUT_SECS")? {
        builder = builder.with_llm(|llm| llm.timeout_secs = timeout);
    }

    if let Some(max_tokens) = env_parse::<u32>("LEARNKIT_MAX_TOKENS")? {
        builder = builder.with_models(|models| models.max_tokens = max_tokens);
    }

    if let Some(chat) = env_string("LEARNKIT_CHAT_MODEL")? {
        builder = builder.with_models(|models| models.chat = chat);
    }

    if let Some(image) = env_string("LEARNKIT_IMAGE_MODEL")? {
        builder = builder.with_models(|models| models.image = image);
    }

    if let Some(bind) = env_string("LEARNKIT_BIND")? {
        builder = builder.with_server(|server| server.bind = bind);
    }

    if let Some(port) = env_parse::<u16>("LEARNKIT_PORT")? {
        builder = builder.with_server(|server| server.port = port);
    }

    Ok(builder)
}

/// Reads `key`, treating unset and blank values alike.
pub fn env_string(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) if val.trim().is_empty() => Ok(None),
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(anyhow!("{key} contains invalid UTF-8")),
    }
}

pub fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env_string(key)? {
        Some(value) => {
            let parsed = value
                .trim()
                .parse::<T>()
                .with_context(|| format!("Failed to parse {key} value '{value}'"))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}
