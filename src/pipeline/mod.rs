//! The "create a learning plan" flow as a sequence of stages.

pub mod adapters;
pub mod context;
pub mod orchestrator;
pub mod outcome;
pub mod stages;
pub mod types;

#[allow(unused_imports)]
pub use adapters::{
    DirectExtractionAdapter, DirectFallbackAdapter, DirectGenerationAdapter, ExtractionAdapter,
    FallbackAdapter, GenerationAdapter,
};
#[allow(unused_imports)]
pub use context::{LearnContext, LearnRun, PipelineEvent};
#[allow(unused_imports)]
pub use orchestrator::{LearningOrchestrator, LearningPipelineBuilder};
pub use outcome::LearnResponse;
#[allow(unused_imports)]
pub use stages::{PipelineStage, StageOutcome};
#[allow(unused_imports)]
pub use types::StageKind;
