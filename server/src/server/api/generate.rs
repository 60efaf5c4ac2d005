//! Generation API: start a run, poll its state, download the archive.

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::Response;
use qr_pipeline::{GenerationRequest, GenerationState};
use serde_json::{Value, json};

use crate::app::SharedState;
use crate::services::generation;

use super::err_json;

/// POST /api/generate
///
/// Validates inline, claims the single generation slot, and spawns the run.
pub async fn start_generation(
    State(state): State<SharedState>,
    body: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let Ok(Json(request)) = body else {
        return Err(err_json(400, "Invalid request"));
    };

    let validated = request
        .validate()
        .map_err(|e| err_json(400, &e.to_string()))?;

    if !state.begin_generation() {
        return Err(err_json(409, "A generation run is already in progress"));
    }

    tokio::spawn(generation::run_generation(state.clone(), validated));
    Ok((StatusCode::ACCEPTED, Json(json!({ "started": true }))))
}

/// GET /api/generate/status
pub async fn generation_status(State(state): State<SharedState>) -> Json<Value> {
    let status = state.with_generation(|g| match g {
        GenerationState::Idle => json!({ "state": "idle" }),
        GenerationState::Validating => json!({ "state": "validating" }),
        GenerationState::Generating(progress) => json!({
            "state": "generating",
            "progress": progress,
            "percent": progress.percent(),
        }),
        GenerationState::Ready(artifact) => json!({
            "state": "ready",
            "fileName": artifact.file_name,
            "size": artifact.data.len(),
        }),
        GenerationState::Failed(message) => json!({ "state": "failed", "error": message }),
    });
    Json(status)
}

/// GET /api/generate/download
pub async fn download_archive(
    State(state): State<SharedState>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let artifact = state
        .with_generation(|g| match g {
            GenerationState::Ready(artifact) => Some(artifact.clone()),
            _ => None,
        })
        .ok_or_else(|| err_json(404, "No archive is ready for download"))?;

    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    let resp = Response::builder()
        .header(header::CONTENT_TYPE, "application/zip")
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from(artifact.data))
        .map_err(|e| err_json(500, &e.to_string()))?;
    Ok(resp)
}
