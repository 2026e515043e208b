use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::client::DynLlmClient;
use crate::config::ModelSettings;
use crate::error::ServiceError;
use crate::extractor::{self, CountPolicy, ExtractedParameters};
use crate::generator::{self, GenerationOutcome, GenerationRequest, ResourceExample};

use super::context::LearnContext;

pub const TOPIC_FAILED: &str = "Could not process this topic right now. Please try again.";
pub const PLAN_FAILED: &str = "Could not generate a learning plan right now. Please try again.";
pub const RESOURCES_FAILED: &str = "Could not find additional learning resources.";

#[async_trait]
pub trait ExtractionAdapter {
    async fn extract(&self, context: &LearnContext) -> Result<ExtractedParameters, ServiceError>;
}

#[async_trait]
pub trait GenerationAdapter {
    async fn generate(
        &self,
        context: &LearnContext,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome, ServiceError>;
}

#[async_trait]
pub trait FallbackAdapter {
    async fn fallback(
        &self,
        context: &LearnContext,
        partial: &[ResourceExample],
    ) -> Result<Vec<ResourceExample>, ServiceError>;
}

/// Runs the extractor against a shared chat client.
pub struct DirectExtractionAdapter {
    client: Arc<DynLlmClient>,
    models: ModelSettings,
    policy: CountPolicy,
}

impl DirectExtractionAdapter {
    pub fn new(client: Arc<DynLlmClient>, models: ModelSettings, policy: CountPolicy) -> Self {
        Self {
            client,
            models,
            policy,
        }
    }
}

#[async_trait]
impl ExtractionAdapter for DirectExtractionAdapter {
    async fn extract(&self, context: &LearnContext) -> Result<ExtractedParameters, ServiceError> {
        extractor::extract_parameters(
            self.client.as_ref(),
            &context.raw_topic,
            &self.models,
            &self.policy,
        )
        .await
        .map_err(|err| {
            warn!(error = %err, "topic extraction failed");
            ServiceError::upstream(TOPIC_FAILED)
        })
    }
}

/// Runs the primary plan/resource generator.
pub struct DirectGenerationAdapter {
    client: Arc<DynLlmClient>,
    models: ModelSettings,
}

impl DirectGenerationAdapter {
    pub fn new(client: Arc<DynLlmClient>, models: ModelSettings) -> Self {
        Self { client, models }
    }
}

#[async_trait]
impl GenerationAdapter for DirectGenerationAdapter {
    async fn generate(
        &self,
        context: &LearnContext,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome, ServiceError> {
        generator::generate_plan(
            self.client.as_ref(),
            request,
            &self.models,
            context.settings.min_usable_resources,
        )
        .await
        .map_err(|err| {
            warn!(error = %err, "plan generation failed");
            ServiceError::upstream(PLAN_FAILED)
        })
    }
}

/// Runs the resource-only fallback call.
pub struct DirectFallbackAdapter {
    client: Arc<DynLlmClient>,
    models: ModelSettings,
}

impl DirectFallbackAdapter {
    pub fn new(client: Arc<DynLlmClient>, models: ModelSettings) -> Self {
        Self { client, models }
    }
}

#[async_trait]
impl FallbackAdapter for DirectFallbackAdapter {
    async fn fallback(
        &self,
        context: &LearnContext,
        partial: &[ResourceExample],
    ) -> Result<Vec<ResourceExample>, ServiceError> {
        generator::generate_fallback_resources(
            self.client.as_ref(),
            context.topic(),
            context.target_resources(),
            partial,
            &self.models,
        )
        .await
        .map_err(|err| {
            warn!(error = %err, "fallback resource generation failed");
            ServiceError::upstream(RESOURCES_FAILED)
        })
    }
}
