//! QR maker server binary.
//!
//! Serves the passkey-gated generator page, the auth endpoint, and the
//! bulk QR generation API.

mod app;
mod config;
mod server;
mod services;

use tracing_subscriber::EnvFilter;

use app::SharedState;
use config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting QR maker");

    config::load_dotenv();
    let config = AppConfig::load();
    let state = SharedState::new(config);

    server::start_server(state).await?;

    tracing::info!("Shut down");
    Ok(())
}
