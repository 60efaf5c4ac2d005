//! Runtime configuration from `.env` + environment variables.

use std::path::PathBuf;

/// Fallback passkey for a fresh deployment before `AUTH_PASSKEY` is set.
const DEFAULT_PASSKEY: &str = "your-secure-passkey-here";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared secret checked by the auth endpoint.
    pub auth_passkey: String,
    pub server_port: u16,
    /// Explicit caption font; system candidates are probed when unset.
    pub label_font_path: Option<PathBuf>,
    /// Session cookies carry the `Secure` flag (release builds).
    pub secure_cookies: bool,
}

impl AppConfig {
    /// Load configuration from the environment.
    pub fn load() -> Self {
        let auth_passkey = match std::env::var("AUTH_PASSKEY") {
            Ok(v) if !v.is_empty() => v,
            _ => {
                tracing::warn!("AUTH_PASSKEY is not set; using the built-in default passkey");
                DEFAULT_PASSKEY.to_string()
            }
        };

        let server_port = parse_u16(&env_or_default("SERVER_PORT"), 8080);
        let label_font_path = {
            let path = env_or_default("QR_LABEL_FONT");
            if path.is_empty() { None } else { Some(PathBuf::from(path)) }
        };

        Self {
            auth_passkey,
            server_port,
            label_font_path,
            secure_cookies: cfg!(not(debug_assertions)),
        }
    }
}

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

fn env_or_default(key: &str) -> String {
    std::env::var(key).unwrap_or_default()
}

fn parse_u16(s: &str, default: u16) -> u16 {
    s.parse().unwrap_or(default)
}
