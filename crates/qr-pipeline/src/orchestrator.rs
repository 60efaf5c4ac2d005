//! Batch-driven generation of QR images into a ZIP archive.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use serde::Deserialize;

use crate::archive::{self, ArchiveBuilder};
use crate::identifier::{self, ItemIdentifier};
use crate::progress::{ArchiveArtifact, GenerationProgress};
use crate::PipelineError;

/// Items rendered concurrently before the orchestrator re-joins.
pub const BATCH_SIZE: u32 = 10;

/// Largest accepted quantity; larger requests are clamped, not rejected.
pub const MAX_QUANTITY: i64 = 2000;

/// Raw request as submitted by the generator page.
///
/// Numeric fields arrive as `Option` so that a client-side `NaN` (JSON
/// `null`) fails validation instead of deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub starting_number: Option<i64>,
    pub quantity: Option<i64>,
    #[serde(default = "default_add_label")]
    pub add_label: bool,
}

fn default_add_label() -> bool {
    true
}

impl GenerationRequest {
    /// Clamp and validate, producing the run parameters.
    ///
    /// The quantity is clamped to [`MAX_QUANTITY`] first; anything still
    /// missing, negative, or non-positive is rejected.
    pub fn validate(&self) -> Result<ValidatedRequest, PipelineError> {
        let starting_number = self.starting_number.ok_or(PipelineError::InvalidInput)?;
        let quantity = self
            .quantity
            .ok_or(PipelineError::InvalidInput)?
            .min(MAX_QUANTITY);
        if starting_number < 0 || quantity <= 0 {
            return Err(PipelineError::InvalidInput);
        }
        Ok(ValidatedRequest {
            starting_number: starting_number as u64,
            quantity: quantity as u32,
            add_label: self.add_label,
        })
    }
}

/// Parameters of an admitted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub starting_number: u64,
    pub quantity: u32,
    pub add_label: bool,
}

impl ValidatedRequest {
    pub fn total_batches(&self) -> u32 {
        self.quantity.div_ceil(BATCH_SIZE)
    }
}

/// Run the full pipeline: render every item, pack the archive.
///
/// `label_font` must be present when labels are enabled. `on_progress` fires
/// after each completed batch. Any item failure aborts the whole run; a
/// retry starts over from batch 0 with a freshly drawn prefix.
pub async fn generate<F>(
    request: ValidatedRequest,
    label_font: Option<Arc<Vec<u8>>>,
    mut on_progress: F,
) -> Result<ArchiveArtifact, PipelineError>
where
    F: FnMut(GenerationProgress),
{
    if request.add_label && label_font.is_none() {
        return Err(PipelineError::MissingLabelFont);
    }

    let prefix = identifier::random_prefix();
    let total_batches = request.total_batches();
    let mut builder = ArchiveBuilder::new();

    tracing::info!(
        prefix = %prefix,
        quantity = request.quantity,
        total_batches,
        add_label = request.add_label,
        "Starting QR generation run"
    );

    for batch in 0..total_batches {
        let start = batch * BATCH_SIZE;
        let end = (start + BATCH_SIZE).min(request.quantity);

        let tasks: Vec<_> = (start..end)
            .map(|offset| {
                let item = ItemIdentifier::derive(&prefix, request.starting_number, offset as u64);
                let font = label_font.clone();
                let add_label = request.add_label;
                tokio::task::spawn_blocking(move || render_item(&item, add_label, font.as_deref()))
            })
            .collect();

        for joined in join_all(tasks).await {
            let (name, data) = joined.map_err(|e| PipelineError::Worker(e.to_string()))??;
            builder.insert(name, data);
        }

        on_progress(GenerationProgress::new(batch + 1, total_batches));
        tracing::debug!(batch = batch + 1, total_batches, "Batch complete");

        // Let the host process pending work between batches.
        tokio::task::yield_now().await;
    }

    let file_name = archive::archive_file_name(Utc::now());
    let data = builder.finalize()?;
    tracing::info!(file_name = %file_name, bytes = data.len(), "Generation run complete");

    Ok(ArchiveArtifact { file_name, data })
}

/// Render one item to `(file name, PNG bytes)`.
fn render_item(
    item: &ItemIdentifier,
    add_label: bool,
    font_data: Option<&Vec<u8>>,
) -> Result<(String, Vec<u8>), PipelineError> {
    let payload = serde_json::to_string(&item.payload())?;
    let qr = qr_engine::render_qr(&payload)?;

    let image = if add_label {
        let font_data = font_data.ok_or(PipelineError::MissingLabelFont)?;
        qr_engine::compose_labeled(&qr, &item.id, font_data)?
    } else {
        qr
    };

    let bytes = qr_engine::to_png_bytes(&image)?;
    Ok((item.file_name(), bytes))
}
