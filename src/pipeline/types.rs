use std::fmt;

/// Logical stages of the learning-plan pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Validation,
    Extraction,
    Generation,
    Fallback,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StageKind::Validation => "validation",
            StageKind::Extraction => "extraction",
            StageKind::Generation => "generation",
            StageKind::Fallback => "fallback",
        };
        write!(f, "{label}")
    }
}
