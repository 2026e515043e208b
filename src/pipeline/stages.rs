use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::generator::{self, GenerationOutcome};
use crate::validator;

use super::adapters::{ExtractionAdapter, FallbackAdapter, GenerationAdapter};
use super::context::LearnContext;
use super::outcome::LearnResponse;
use super::types::StageKind;

pub const RESOURCES_UNAVAILABLE: &str = "We couldn't find learning resources for this topic right now. Your learning plan is ready; try again later for resources.";
pub const RESOURCES_PARTIAL: &str =
    "Only a few learning resources could be found for this topic.";

/// Control flow instruction returned by stage execution.
#[derive(Debug)]
pub enum StageOutcome {
    Continue,
    Finished(LearnResponse),
}

#[async_trait]
pub trait PipelineStage: Send + Sync {
    fn kind(&self) -> StageKind;

    async fn execute(&self, context: &mut LearnContext) -> Result<StageOutcome, ServiceError>;
}

/// Local heuristics; never touches the network.
pub struct ValidationStage;

#[async_trait]
impl PipelineStage for ValidationStage {
    fn kind(&self) -> StageKind {
        StageKind::Validation
    }

    async fn execute(&self, context: &mut LearnContext) -> Result<StageOutcome, ServiceError> {
        validator::validate_topic(&context.raw_topic)?;
        Ok(StageOutcome::Continue)
    }
}

pub struct ExtractionStage<E> {
    adapter: Arc<E>,
}

impl<E> ExtractionStage<E> {
    pub fn new(adapter: E) -> Self {
        Self {
            adapter: Arc::new(adapter),
        }
    }
}

#[async_trait]
impl<E> PipelineStage for ExtractionStage<E>
where
    E: ExtractionAdapter + Send + Sync + 'static,
{
    fn kind(&self) -> StageKind {
        StageKind::Extraction
    }

    async fn execute(&self, context: &mut LearnContext) -> Result<StageOutcome, ServiceError> {
        let parameters = self.adapter.extract(context).await?;
        if let Some(reason) = parameters.rejection() {
            return Err(ServiceError::rejected(reason));
        }
        context.record_parameters(parameters);
        Ok(StageOutcome::Continue)
    }
}

pub struct GenerationStage<G> {
    adapter: Arc<G>,
}

impl<G> GenerationStage<G> {
    pub fn new(adapter: G) -> Self {
        Self {
            adapter: Arc::new(adapter),
        }
    }
}

#[async_trait]
impl<G> PipelineStage for GenerationStage<G>
where
    G: GenerationAdapter + Send + Sync + 'static,
{
    fn kind(&self) -> StageKind {
        StageKind::Generation
    }

    async fn execute(&self, context: &mut LearnContext) -> Result<StageOutcome, ServiceError> {
        let request = context.generation_request();
        let outcome = self.adapter.generate(context, &request).await?;

        if let GenerationOutcome::Complete { plan, resources } = &outcome {
            let response = LearnResponse {
                plan: plan.clone(),
                examples: resources.clone(),
                message: None,
            };
            context.record_generation(outcome);
            return Ok(StageOutcome::Finished(response));
        }

        context.record_generation(outcome);
        Ok(StageOutcome::Continue)
    }
}

/// Tops up resources at most once. A failed top-up degrades the response
/// instead of failing it.
pub struct FallbackStage<F> {
    adapter: Arc<F>,
}

impl<F> FallbackStage<F> {
    pub fn new(adapter: F) -> Self {
        Self {
            adapter: Arc::new(adapter),
        }
    }
}

#[async_trait]
impl<F> PipelineStage for FallbackStage<F>
where
    F: FallbackAdapter + Send + Sync + 'static,
{
    fn kind(&self) -> StageKind {
        StageKind::Fallback
    }

    async fn execute(&self, context: &mut LearnContext) -> Result<StageOutcome, ServiceError> {
        if context.plan.is_none() {
            context.record_stage_skip(self.kind(), "no plan produced");
            return Ok(StageOutcome::Continue);
        }
        if !context.fallback_needed {
            context.record_stage_skip(self.kind(), "primary generation returned enough resources");
            return Ok(StageOutcome::Continue);
        }

        let partial = context.resources.clone();
        let target = context.target_resources() as usize;

        let result = self.adapter.fallback(context, &partial).await;
        let (resources, message) = match result {
            Ok(additions) => {
                let merged = generator::merge_resources(partial, additions, target);
                let message = merged.is_empty().then(|| RESOURCES_UNAVAILABLE.to_string());
                (merged, message)
            }
            Err(err) => {
                context.record_stage_failure(self.kind(), err.to_string());
                let message = if partial.is_empty() {
                    RESOURCES_UNAVAILABLE
                } else {
                    RESOURCES_PARTIAL
                };
                (partial, Some(message.to_string()))
            }
        };

        context.record_fallback(resources, message);
        Ok(StageOutcome::Continue)
    }
}
