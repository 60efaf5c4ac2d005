//! Bulk QR generation pipeline.
//!
//! Derives per-item identifiers, drives the rendering engine in batches,
//! and packs the results into a single downloadable ZIP archive. The run
//! lifecycle is modeled by [`progress::GenerationState`].

pub mod archive;
pub mod identifier;
pub mod orchestrator;
pub mod progress;

// Re-exports for convenience
pub use archive::{ARCHIVE_FOLDER, ArchiveBuilder, archive_file_name};
pub use identifier::{DOMAIN_TAG, ItemIdentifier};
pub use orchestrator::{BATCH_SIZE, GenerationRequest, MAX_QUANTITY, ValidatedRequest, generate};
pub use progress::{ArchiveArtifact, GenerationProgress, GenerationState};

/// Errors that can occur during a generation run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Request fields missing, non-numeric, or out of range.
    #[error("Please enter valid numbers")]
    InvalidInput,

    #[error("caption font is required when labels are enabled")]
    MissingLabelFont,

    #[error(transparent)]
    Engine(#[from] qr_engine::EngineError),

    #[error("payload serialization error: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("archive I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("worker task failed: {0}")]
    Worker(String),
}
