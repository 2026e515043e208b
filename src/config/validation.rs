use anyhow::{Result, anyhow};

use crate::extractor::CountPolicy;

use super::types::Config;

/// Fails fast on settings the service cannot start without.
pub fn validate(config: &Config) -> Result<()> {
    if config.llm.api_key.trim().is_empty() {
        let provider = config.llm.provider;
        return Err(anyhow!(
            "{} API key not found. Set {} or add it to {}",
            provider.display_name(),
            provider.api_key_env_var(),
            Config::config_path()?.display()
        ));
    }

    if config.llm.timeout_secs == 0 {
        return Err(anyhow!("timeout_secs must be greater than zero"));
    }

    if config.models.max_tokens == 0 {
        return Err(anyhow!("max_tokens must be greater than zero"));
    }

    if config.plan.min_usable_resources == 0 {
        return Err(anyhow!("min_usable_resources must be at least 1"));
    }

    let policy = CountPolicy::default();
    if !policy.steps.contains(&config.plan.default_steps) {
        return Err(anyhow!(
            "default_steps must be between {} and {}",
            policy.steps.start(),
            policy.steps.end()
        ));
    }
    if !policy.resources.contains(&config.plan.default_resources) {
        return Err(anyhow!(
            "default_resources must be between {} and {}",
            policy.resources.start(),
            policy.resources.end()
        ));
    }

    Ok(())
}
