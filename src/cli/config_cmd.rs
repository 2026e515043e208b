use anyhow::{Context, Result};

use crate::config::{Config, LlmProvider};

use super::args::ConfigArgs;
use super::util::mask_api_key;

impl ConfigArgs {
    fn changes_anything(&self) -> bool {
        self.provider.is_some()
            || self.api_key.is_some()
            || self.timeout.is_some()
            || self.max_tokens.is_some()
            || self.chat_model.is_some()
            || self.image_model.is_some()
    }
}

pub(crate) fn handle_config(args: &ConfigArgs) -> Result<()> {
    let mut config = Config::load_unvalidated()?;

    if args.show || !args.changes_anything() {
        print_config(&config)?;
        return Ok(());
    }

    if let Some(ref provider) = args.provider {
        let provider: LlmProvider = provider.parse().context("Invalid --provider value")?;
        if config.llm.provider != provider {
            config.llm.provider = provider;
            config.llm.base_url = provider.default_base_url().to_string();
        }
    }

    if let Some(ref api_key) = args.api_key {
        config.llm.api_key = api_key.trim().to_string();
    }

    if let Some(timeout) = args.timeout {
        config.llm.timeout_secs = timeout;
    }

    if let Some(max_tokens) = args.max_tokens {
        config.models.max_tokens = max_tokens;
    }

    if let Some(ref chat_model) = args.chat_model {
        config.models.chat = chat_model.clone();
    }

    if let Some(ref image_model) = args.image_model {
        config.models.image = image_model.clone();
    }

    config.validate()?;
    config.save()?;

    println!("✅ Configuration saved to {}", Config::config_path()?.display());
    print_config(&config)
}

fn print_config(config: &Config) -> Result<()> {
    println!("📋 Current configuration:");
    println!("   Provider: {}", config.llm.provider.display_name());
    println!("   API Key: {}", mask_api_key(&config.llm.api_key));
    println!("   Base URL: {}", config.llm.base_url);
    println!("   Timeout: {}s", config.llm.timeout_secs);
    println!("   Max Tokens: {}", config.models.max_tokens);
    println!("   Chat Model: {}", config.models.chat);
    println!("   Image Model: {}", config.models.image);
    println!("   Listen: {}:{}", config.server.bind, config.server.port);
    println!("   Config File: {}", Config::config_path()?.display());
    Ok(())
}
