//! Embedded pages: login form and generator UI.

use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;
use serde_json::json;

#[derive(Embed)]
#[folder = "assets/"]
struct PageAssets;

/// GET /
pub async fn index_page() -> Response {
    serve_embedded("index.html")
}

/// GET /login
pub async fn login_page() -> Response {
    serve_embedded("login.html")
}

/// GET /assets/{*path}
pub async fn asset_handler(axum::extract::Path(path): axum::extract::Path<String>) -> Response {
    serve_embedded(&path)
}

/// Fallback: API paths get a JSON 404, everything else the generator page.
pub async fn fallback(uri: Uri) -> Response {
    let request_path = uri.path();
    if is_api_path(request_path) {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(json!({
                "error": "Not Found",
                "path": request_path,
            })),
        )
            .into_response();
    }
    serve_embedded("index.html")
}

fn is_api_path(path: &str) -> bool {
    const API_PREFIXES: [&str; 2] = ["/api", "/ws"];

    API_PREFIXES.iter().any(|prefix| {
        path == *prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

fn serve_embedded(path: &str) -> Response {
    match PageAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.to_vec(),
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::{fallback, is_api_path};
    use axum::body::to_bytes;
    use axum::http::{StatusCode, Uri, header};

    #[test]
    fn api_paths_are_detected_by_root_segment() {
        for path in ["/api", "/api/nonexistent", "/ws", "/ws/feed"] {
            assert!(is_api_path(path), "{path} should be an API path");
        }
        for path in ["/", "/login", "/apiary", "/wsx"] {
            assert!(!is_api_path(path), "{path} should not be an API path");
        }
    }

    #[tokio::test]
    async fn fallback_returns_json_404_for_api_paths() {
        let response = fallback(Uri::from_static("/api/nonexistent")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["path"], "/api/nonexistent");
    }

    #[tokio::test]
    async fn fallback_serves_the_generator_page_otherwise() {
        let response = fallback(Uri::from_static("/anything")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
    }
}
