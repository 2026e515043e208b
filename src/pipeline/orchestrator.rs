use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::client::DynLlmClient;
use crate::config::{Config, PlanSettings};
use crate::error::ServiceError;
use crate::extractor::CountPolicy;

use super::adapters::{
    DirectExtractionAdapter, DirectFallbackAdapter, DirectGenerationAdapter, ExtractionAdapter,
    FallbackAdapter, GenerationAdapter,
};
use super::context::{LearnContext, LearnRun};
use super::outcome::LearnResponse;
use super::stages::{
    ExtractionStage, FallbackStage, GenerationStage, PipelineStage, StageOutcome, ValidationStage,
};

/// Runs the stages in order for one "create a learning plan" request.
pub struct LearningOrchestrator {
    stages: Vec<Box<dyn PipelineStage>>,
    settings: PlanSettings,
}

impl LearningOrchestrator {
    pub fn new(stages: Vec<Box<dyn PipelineStage>>, settings: PlanSettings) -> Self {
        Self { stages, settings }
    }

    pub fn builder(settings: PlanSettings) -> LearningPipelineBuilder {
        LearningPipelineBuilder::new(settings)
    }

    /// Validation, extraction, generation and fallback over one chat client.
    pub fn standard(client: Arc<DynLlmClient>, config: &Config) -> Self {
        Self::builder(config.plan.clone())
            .with_default_adapters(client, config)
            .build()
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Runs the stages and writes the recorded event trail to the debug log.
    pub async fn run(&self, topic: &str) -> Result<LearnResponse, ServiceError> {
        let run = self.run_traced(topic).await;
        for event in &run.events {
            debug!(?event, "pipeline event");
        }
        run.result
    }

    pub async fn run_traced(&self, topic: &str) -> LearnRun {
        let mut context = LearnContext::new(topic, self.settings.clone());

        for stage in &self.stages {
            let kind = stage.kind();
            context.record_stage_start(kind);
            debug!(stage = %kind, "stage started");
            match stage.execute(&mut context).await {
                Ok(StageOutcome::Continue) => {
                    context.record_stage_end(kind);
                }
                Ok(StageOutcome::Finished(response)) => {
                    context.record_stage_end(kind);
                    info!(stage = %kind, steps = response.plan.len(), examples = response.examples.len(), "learning plan ready");
                    return LearnRun {
                        result: Ok(response),
                        events: context.events().to_vec(),
                    };
                }
                Err(error) => {
                    warn!(stage = %kind, error = %error, "stage failed");
                    context.record_stage_failure(kind, error.to_string());
                    return LearnRun {
                        result: Err(error),
                        events: context.events().to_vec(),
                    };
                }
            }
        }

        let events = context.events().to_vec();
        let result = context.into_response();
        if let Ok(response) = &result {
            info!(
                steps = response.plan.len(),
                examples = response.examples.len(),
                degraded = response.message.is_some(),
                "learning plan ready"
            );
        }
        LearnRun { result, events }
    }
}

pub struct LearningPipelineBuilder {
    stages: Vec<Box<dyn PipelineStage>>,
    settings: PlanSettings,
}

impl LearningPipelineBuilder {
    pub fn new(settings: PlanSettings) -> Self {
        Self {
            stages: Vec::new(),
            settings,
        }
    }

    pub fn add_stage<S>(mut self, stage: S) -> Self
    where
        S: PipelineStage + 'static,
    {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn with_validation(self) -> Self {
        self.add_stage(ValidationStage)
    }

    pub fn with_extraction_adapter<E>(self, adapter: E) -> Self
    where
        E: ExtractionAdapter + Send + Sync + 'static,
    {
        self.add_stage(ExtractionStage::new(adapter))
    }

    pub fn with_generation_adapter<G>(self, adapter: G) -> Self
    where
        G: GenerationAdapter + Send + Sync + 'static,
    {
        self.add_stage(GenerationStage::new(adapter))
    }

    pub fn with_fallback_adapter<F>(self, adapter: F) -> Self
    where
        F: FallbackAdapter + Send + Sync + 'static,
    {
        self.add_stage(FallbackStage::new(adapter))
    }

    pub fn with_default_adapters(self, client: Arc<DynLlmClient>, config: &Config) -> Self {
        self.with_validation()
            .with_extraction_adapter(DirectExtractionAdapter::new(
                client.clone(),
                config.models.clone(),
                CountPolicy::default(),
            ))
            .with_generation_adapter(DirectGenerationAdapter::new(
                client.clone(),
                config.models.clone(),
            ))
            .with_fallback_adapter(DirectFallbackAdapter::new(client, config.models.clone()))
    }

    pub fn build(self) -> LearningOrchestrator {
        LearningOrchestrator::new(self.stages, self.settings)
    }
}
