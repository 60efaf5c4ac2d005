//! Application shared state.

use std::sync::{Arc, Mutex, MutexGuard};

use qr_pipeline::GenerationState;
use tokio::sync::broadcast;

use crate::config::AppConfig;

/// Shared state accessible from every axum handler and the run service.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Broadcast channel for WebSocket messages
    ws_tx: broadcast::Sender<String>,
    /// Application configuration (fixed at startup)
    config: AppConfig,
    /// The single generation slot
    generation: Mutex<GenerationState>,
}

impl SharedState {
    pub fn new(config: AppConfig) -> Self {
        let (ws_tx, _) = broadcast::channel(256);

        Self {
            inner: Arc::new(SharedStateInner {
                ws_tx,
                config,
                generation: Mutex::new(GenerationState::Idle),
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn ws_sender(&self) -> &broadcast::Sender<String> {
        &self.inner.ws_tx
    }

    pub fn subscribe_ws(&self) -> broadcast::Receiver<String> {
        self.inner.ws_tx.subscribe()
    }

    /// Send an event to every connected WebSocket client.
    pub fn broadcast(&self, message: String) {
        let _ = self.inner.ws_tx.send(message);
    }

    /// Run `f` against the current generation state.
    pub fn with_generation<R>(&self, f: impl FnOnce(&GenerationState) -> R) -> R {
        f(&self.lock_generation())
    }

    pub fn set_generation(&self, state: GenerationState) {
        *self.lock_generation() = state;
    }

    /// Claim the generation slot. Returns false while a run is in flight.
    pub fn begin_generation(&self) -> bool {
        let mut slot = self.lock_generation();
        if !slot.accepts_new_run() {
            return false;
        }
        *slot = GenerationState::Validating;
        true
    }

    fn lock_generation(&self) -> MutexGuard<'_, GenerationState> {
        // The state enum is coherent even after a poisoning panic.
        self.inner
            .generation
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> SharedState {
        SharedState::new(AppConfig {
            auth_passkey: "test-passkey".into(),
            server_port: 0,
            label_font_path: None,
            secure_cookies: false,
        })
    }

    #[test]
    fn generation_slot_is_single_flight() {
        let state = test_state();
        assert!(state.begin_generation());
        assert!(!state.begin_generation());

        state.set_generation(GenerationState::Failed("boom".into()));
        assert!(state.begin_generation());
    }

    #[test]
    fn slot_starts_idle() {
        let state = test_state();
        state.with_generation(|g| assert!(matches!(g, GenerationState::Idle)));
    }
}
