//! Generation run state machine and progress reporting.

use serde::Serialize;

/// Batch-level progress of an in-flight run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationProgress {
    pub completed_batches: u32,
    pub total_batches: u32,
}

impl GenerationProgress {
    pub fn new(completed_batches: u32, total_batches: u32) -> Self {
        Self {
            completed_batches,
            total_batches,
        }
    }

    /// Completion percentage over whole batches.
    pub fn percent(&self) -> f32 {
        if self.total_batches == 0 {
            return 0.0;
        }
        self.completed_batches as f32 / self.total_batches as f32 * 100.0
    }
}

/// A finalized, downloadable archive.
#[derive(Clone)]
pub struct ArchiveArtifact {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for ArchiveArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveArtifact")
            .field("file_name", &self.file_name)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Lifecycle of the single generation slot.
///
/// Idle -> Validating -> Generating -> Ready | Failed. Ready and Failed
/// accept a new run; Validating and Generating do not.
#[derive(Debug, Clone, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Validating,
    Generating(GenerationProgress),
    Ready(ArchiveArtifact),
    Failed(String),
}

impl GenerationState {
    /// Short lowercase tag used by the status API.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Generating(_) => "generating",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
        }
    }

    /// Whether a new run may start from this state.
    pub fn accepts_new_run(&self) -> bool {
        !matches!(self, Self::Validating | Self::Generating(_))
    }
}
