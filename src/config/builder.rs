use anyhow::Result;

use super::types::{Config, LlmSettings, ModelSettings, PlanSettings, ServerSettings};

#[derive(Debug)]
pub struct ConfigBuilder {
    pub(super) llm: LlmSettings,
    pub(super) models: ModelSettings,
    pub(super) server: ServerSettings,
    pub(super) plan: PlanSettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            llm: LlmSettings::default(),
            models: ModelSettings::default(),
            server: ServerSettings::default(),
            plan: PlanSettings::default(),
        }
    }

    pub fn with_llm<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut LlmSettings),
    {
        update(&mut self.llm);
        self
    }

    pub fn with_models<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut ModelSettings),
    {
        update(&mut self.models);
        self
    }

    pub fn with_server<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut ServerSettings),
    {
        update(&mut self.server);
        self
    }

    pub fn with_plan<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut PlanSettings),
    {
        update(&mut self.plan);
        self
    }

    pub fn build(self) -> Result<Config> {
        Ok(Config {
            llm: self.llm,
            models: self.models,
            server: self.server,
            plan: self.plan,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
