//! Route-protection middleware: navigation without a session cookie is
//! redirected to the login page.

use axum::extract::Request;
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use super::api::auth::AUTH_COOKIE_NAME;

/// Redirect any request lacking the session cookie to `/login`.
///
/// The auth endpoint, the login page, and static asset paths always pass
/// through. Only cookie presence is checked; the value is not inspected.
pub async fn require_session(request: Request, next: Next) -> Response {
    if is_exempt(request.uri().path()) || has_session_cookie(request.headers()) {
        return next.run(request).await;
    }
    Redirect::to("/login").into_response()
}

fn is_exempt(path: &str) -> bool {
    path.starts_with("/api/auth")
        || path == "/login"
        || path == "/favicon.ico"
        || path.starts_with("/assets/")
}

fn has_session_cookie(headers: &HeaderMap) -> bool {
    let Some(cookies) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    cookies.split(';').any(|pair| {
        pair.trim()
            .split_once('=')
            .is_some_and(|(name, _)| name == AUTH_COOKIE_NAME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn exempt_paths_bypass_the_gate() {
        for path in ["/api/auth", "/api/auth/", "/login", "/favicon.ico", "/assets/app.css"] {
            assert!(is_exempt(path), "{path} should be exempt");
        }
        for path in ["/", "/api/generate", "/ws", "/loginx"] {
            assert!(!is_exempt(path), "{path} should be gated");
        }
    }

    #[test]
    fn session_cookie_is_detected_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; auth_token=authenticated; lang=en"),
        );
        assert!(has_session_cookie(&headers));
    }

    #[test]
    fn absent_or_foreign_cookies_do_not_count() {
        assert!(!has_session_cookie(&HeaderMap::new()));

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert!(!has_session_cookie(&headers));

        // Name must match exactly, not by prefix.
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("auth_token_old=authenticated"),
        );
        assert!(!has_session_cookie(&headers));
    }
}
