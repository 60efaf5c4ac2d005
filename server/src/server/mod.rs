pub mod api;
pub mod assets;
pub mod gate;
pub mod router;
pub mod websocket;

use anyhow::Result;

use crate::app::SharedState;

/// Start the axum HTTP + WebSocket server and block until shutdown.
pub async fn start_server(state: SharedState) -> Result<()> {
    let port = state.config().server_port;
    let app = router::create_router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("QR maker listening on http://{addr}");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        })
        .await?;

    Ok(())
}
