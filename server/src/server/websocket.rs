use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};

use crate::app::SharedState;

/// WebSocket upgrade handler. Connected clients receive generation events.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: SharedState) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.subscribe_ws();

    // Send connection confirmation
    let client_id = uuid::Uuid::new_v4().to_string();
    let welcome = serde_json::json!({
        "type": "connected",
        "data": { "clientId": client_id }
    });
    if sender
        .send(Message::Text(welcome.to_string().into()))
        .await
        .is_err()
    {
        return;
    }

    tracing::info!("WebSocket client connected: {}", client_id);

    // Forward broadcast events to this client
    let mut send_task = tokio::spawn(async move {
        while let Ok(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Drain client messages; only application-level pings are answered
    let ws_tx = state.ws_sender().clone();
    let cid = client_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    if is_ping(&text) {
                        let pong = serde_json::json!({ "type": "pong" });
                        let _ = ws_tx.send(pong.to_string());
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
        tracing::info!("WebSocket client disconnected: {}", cid);
    });

    // Wait for either task to finish
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
}

fn is_ping(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text)
        .map(|v| v.get("type").and_then(|t| t.as_str()) == Some("ping"))
        .unwrap_or(false)
}
