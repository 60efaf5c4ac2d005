use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::app::SharedState;

use super::{api, assets, gate, websocket};

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // --- Pages ---
        .route("/", get(assets::index_page))
        .route("/login", get(assets::login_page))
        // --- Auth ---
        .route("/api/auth", post(api::auth::authenticate))
        // --- Generation ---
        .route("/api/generate", post(api::generate::start_generation))
        .route("/api/generate/status", get(api::generate::generation_status))
        .route("/api/generate/download", get(api::generate::download_archive))
        // --- Progress feed ---
        .route("/ws", get(websocket::ws_handler))
        // --- Static assets ---
        .route("/assets/{*path}", get(assets::asset_handler))
        .fallback(assets::fallback)
        // --- Middleware ---
        .layer(middleware::from_fn(gate::require_session))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
