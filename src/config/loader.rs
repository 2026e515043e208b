use anyhow::{Context, Result};
use dirs::home_dir;
use std::{fs, path::Path};

use super::Config;
use super::builder::ConfigBuilder;
use super::environment::apply_env_overrides;
use super::types::{FileConfig, LlmProvider, PersistedConfig};
use super::validation::validate;

impl Config {
    pub fn config_path() -> Result<std::path::PathBuf> {
        let mut path = home_dir().context("Could not determine home directory")?;
        path.push(".learnkit/config");
        Ok(path)
    }

    #[cfg(test)]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Loads defaults, the config file, and env overrides, then validates.
    pub fn load() -> Result<Self> {
        let config = Self::load_unvalidated()?;
        validate(&config)?;
        Ok(config)
    }

    /// Same layering as [`Config::load`] without the startup checks, for
    /// editing a partial configuration.
    pub fn load_unvalidated() -> Result<Self> {
        let path = Self::config_path()?;
        let mut builder = ConfigBuilder::new();

        if path.exists() {
            builder = Self::apply_file(builder, &path)?;
        }

        builder = apply_env_overrides(builder)?;
        builder.build()
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Unable to create config directory {}", parent.display())
            })?;
        }

        let payload = PersistedConfig::from(self);
        let json = serde_json::to_string_pretty(&payload)
            .context("Failed to serialize configuration to JSON")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        validate(self)
    }

    fn apply_file(builder: ConfigBuilder, path: &Path) -> Result<ConfigBuilder> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed reading config at {}", path.display()))?;

        if contents.trim().is_empty() {
            return Ok(builder);
        }

        let file: FileConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed parsing JSON config at {}", path.display()))?;

        file.apply(builder)
    }
}

impl FileConfig {
    pub fn apply(self, builder: ConfigBuilder) -> Result<ConfigBuilder> {
        let FileConfig {
            llm,
            models,
            server,
            plan,
        } = self;

        let provider = llm
            .provider
            .as_deref()
            .map(str::parse::<LlmProvider>)
            .transpose()
            .context("Invalid provider in config file")?;

        let builder = builder
            .with_llm(|settings| {
                if let Some(provider) = provider {
                    if settings.provider != provider {
                        settings.provider = provider;
                        settings.base_url = provider.default_base_url().to_string();
                    }
                }
                if let Some(api_key) = llm.api_key {
                    settings.api_key = api_key;
                }
                if let Some(timeout) = llm.timeout_secs {
                    settings.timeout_secs = timeout;
                }
                if let Some(base_url) = llm.base_url {
                    settings.base_url = base_url;
                }
                if let Some(user_agent) = llm.user_agent {
                    settings.user_agent = user_agent;
                }
            })
            .with_models(|settings| {
                if let Some(chat) = models.chat {
                    settings.chat = chat;
                }
                if let Some(image) = models.image {
                    settings.image = image;
                }
                if let Some(max_tokens) = models.max_tokens {
                    settings.max_tokens = max_tokens;
                }
            })
            .with_server(|settings| {
                if let Some(bind) = server.bind {
                    settings.bind = bind;
                }
                if let Some(port) = server.port {
                    settings.port = port;
                }
            })
            .with_plan(|settings| {
                if let Some(steps) = plan.default_steps {
                    settings.default_steps = steps;
                }
                if let Some(resources) = plan.default_resources {
                    settings.default_resources = resources;
                }
                if let Some(minimum) = plan.min_usable_resources {
                    settings.min_usable_resources = minimum;
                }
            });

        Ok(builder)
    }
}
