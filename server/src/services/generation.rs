//! Generation run service: drives the pipeline and the state machine.

use std::sync::Arc;

use qr_pipeline::{ArchiveArtifact, GenerationProgress, GenerationState, ValidatedRequest};
use serde_json::json;

use crate::app::SharedState;

/// Fallback text when a pipeline error carries no message.
const GENERIC_ERROR: &str = "An unknown error occurred";

/// Execute one generation run, keeping shared state and WS clients updated.
///
/// The caller must already have claimed the slot via
/// [`SharedState::begin_generation`].
pub async fn run_generation(state: SharedState, request: ValidatedRequest) {
    let label_font = if request.add_label {
        match qr_engine::load_label_font_data(state.config().label_font_path.as_deref()) {
            Ok(data) => Some(Arc::new(data)),
            Err(e) => {
                fail(&state, e.to_string());
                return;
            }
        }
    } else {
        None
    };

    state.set_generation(GenerationState::Generating(GenerationProgress::new(
        0,
        request.total_batches(),
    )));

    let progress_state = state.clone();
    let result = qr_pipeline::generate(request, label_font, move |progress| {
        progress_state.set_generation(GenerationState::Generating(progress.clone()));
        progress_state.broadcast(
            json!({
                "type": "generation_progress",
                "data": {
                    "completedBatches": progress.completed_batches,
                    "totalBatches": progress.total_batches,
                    "percent": progress.percent(),
                },
            })
            .to_string(),
        );
    })
    .await;

    match result {
        Ok(artifact) => complete(&state, artifact),
        Err(e) => {
            let message = e.to_string();
            if message.is_empty() {
                fail(&state, GENERIC_ERROR.to_string());
            } else {
                fail(&state, message);
            }
        }
    }
}

fn complete(state: &SharedState, artifact: ArchiveArtifact) {
    state.broadcast(
        json!({
            "type": "generation_complete",
            "data": {
                "fileName": artifact.file_name,
                "size": artifact.data.len(),
            },
        })
        .to_string(),
    );
    state.set_generation(GenerationState::Ready(artifact));
}

fn fail(state: &SharedState, message: String) {
    tracing::warn!("Generation run failed: {message}");
    state.broadcast(
        json!({
            "type": "generation_failed",
            "data": { "error": message },
        })
        .to_string(),
    );
    state.set_generation(GenerationState::Failed(message));
}
