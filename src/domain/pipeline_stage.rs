use std::fmt;

/// Progress of one upload request through the processing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Staged,
    Extracted,
    Aggregated,
    Modeled,
    Responded,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Staged => "staged",
            Self::Extracted => "extracted",
            Self::Aggregated => "aggregated",
            Self::Modeled => "modeled",
            Self::Responded => "responded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
