use crate::config::PlanSettings;
use crate::error::ServiceError;
use crate::extractor::ExtractedParameters;
use crate::generator::{GenerationOutcome, GenerationRequest, LearningPlan, ResourceExample};

use super::outcome::LearnResponse;
use super::types::StageKind;

/// Per-request state threaded through the stages.
#[derive(Debug, Clone)]
pub struct LearnContext {
    pub raw_topic: String,
    pub settings: PlanSettings,
    pub parameters: Option<ExtractedParameters>,
    pub plan: Option<LearningPlan>,
    pub resources: Vec<ResourceExample>,
    /// Set by generation when the fallback should run.
    pub fallback_needed: bool,
    pub message: Option<String>,
    events: Vec<PipelineEvent>,
}

impl LearnContext {
    pub fn new(raw_topic: impl Into<String>, settings: PlanSettings) -> Self {
        Self {
            raw_topic: raw_topic.into(),
            settings,
            parameters: None,
            plan: None,
            resources: Vec::new(),
            fallback_needed: false,
            message: None,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[PipelineEvent] {
        &self.events
    }

    pub fn record_event(&mut self, event: PipelineEvent) {
        self.events.push(event);
    }

    pub fn record_stage_start(&mut self, stage: StageKind) {
        self.record_event(PipelineEvent::StageStarted(stage));
    }

    pub fn record_stage_end(&mut self, stage: StageKind) {
        self.record_event(PipelineEvent::StageCompleted(stage));
    }

    pub fn record_stage_skip(&mut self, stage: StageKind, reason: impl Into<String>) {
        self.record_event(PipelineEvent::StageSkipped {
            stage,
            reason: reason.into(),
        });
    }

    pub fn record_stage_failure(&mut self, stage: StageKind, error: impl Into<String>) {
        self.record_event(PipelineEvent::StageFailed {
            stage,
            error: error.into(),
        });
    }

    pub fn record_parameters(&mut self, parameters: ExtractedParameters) {
        self.record_event(PipelineEvent::TopicAccepted {
            topic: parameters.clean_topic.clone(),
        });
        self.parameters = Some(parameters);
    }

    pub fn record_generation(&mut self, outcome: GenerationOutcome) {
        let (plan, resources, fallback_needed) = match outcome {
            GenerationOutcome::Complete { plan, resources } => (plan, resources, false),
            GenerationOutcome::InsufficientResources { plan, partial } => (plan, partial, true),
        };
        self.record_event(PipelineEvent::PlanReady {
            steps: plan.len(),
            resources: resources.len(),
        });
        self.plan = Some(plan);
        self.resources = resources;
        self.fallback_needed = fallback_needed;
    }

    pub fn record_fallback(&mut self, resources: Vec<ResourceExample>, message: Option<String>) {
        self.record_event(PipelineEvent::FallbackFinished {
            resources: resources.len(),
            degraded: message.is_some(),
        });
        self.resources = resources;
        self.message = message;
        self.fallback_needed = false;
    }

    /// The extracted topic, or the raw input before extraction has run.
    pub fn topic(&self) -> &str {
        self.parameters
            .as_ref()
            .map(|parameters| parameters.clean_topic.as_str())
            .unwrap_or_else(|| self.raw_topic.trim())
    }

    pub fn target_steps(&self) -> u32 {
        self.parameters
            .as_ref()
            .and_then(|parameters| parameters.requested_step_count)
            .unwrap_or(self.settings.default_steps)
    }

    pub fn target_resources(&self) -> u32 {
        self.parameters
            .as_ref()
            .and_then(|parameters| parameters.requested_resource_count)
            .unwrap_or(self.settings.default_resources)
    }

    pub fn generation_request(&self) -> GenerationRequest {
        GenerationRequest {
            topic: self.topic().to_string(),
            step_count: self.target_steps(),
            resource_count: self.target_resources(),
        }
    }

    /// Assembles the response once a plan exists.
    pub fn into_response(self) -> Result<LearnResponse, ServiceError> {
        let plan = self
            .plan
            .ok_or_else(|| ServiceError::upstream("No learning plan was produced"))?;
        Ok(LearnResponse {
            plan,
            examples: self.resources,
            message: self.message,
        })
    }
}

/// Structured audit events emitted while a request moves through the stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    StageStarted(StageKind),
    StageCompleted(StageKind),
    StageSkipped { stage: StageKind, reason: String },
    StageFailed { stage: StageKind, error: String },
    TopicAccepted { topic: String },
    PlanReady { steps: usize, resources: usize },
    FallbackFinished { resources: usize, degraded: bool },
}

/// A finished run together with everything it recorded.
#[derive(Debug, Clone)]
pub struct LearnRun {
    pub result: Result<LearnResponse, ServiceError>,
    pub events: Vec<PipelineEvent>,
}
