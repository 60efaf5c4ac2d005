//! Passkey authentication endpoint.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::app::SharedState;

use super::err_json;

/// Session cookie name checked by the route gate.
pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// Session cookie value.
pub const AUTH_COOKIE_VALUE: &str = "authenticated";

/// Session lifetime in seconds (24 hours).
const COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24;

#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub passkey: String,
}

/// POST /api/auth
pub async fn authenticate(
    State(state): State<SharedState>,
    body: Result<Json<AuthRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = body else {
        return err_json(400, "Invalid request").into_response();
    };

    if !passkey_matches(&request.passkey, &state.config().auth_passkey) {
        tracing::warn!("Rejected login attempt with invalid passkey");
        return err_json(401, "Invalid passkey").into_response();
    }

    let cookie = session_cookie(state.config().secure_cookies);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "success": true })),
    )
        .into_response()
}

/// Compare the submitted passkey against the configured secret.
///
/// Both sides are hashed first; comparison time does not depend on where
/// the strings diverge.
fn passkey_matches(submitted: &str, expected: &str) -> bool {
    Sha256::digest(submitted.as_bytes()) == Sha256::digest(expected.as_bytes())
}

/// Build the Set-Cookie value for an authenticated session.
fn session_cookie(secure: bool) -> String {
    let mut cookie = format!(
        "{AUTH_COOKIE_NAME}={AUTH_COOKIE_VALUE}; Max-Age={COOKIE_MAX_AGE_SECS}; Path=/; HttpOnly; SameSite=Strict"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
