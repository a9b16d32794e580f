use axum::extract::{Request, State};
use axum::http::header::HeaderValue;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use crate::connector::api::controller::ErrorBody;
use crate::connector::api::AppState;
use crate::domain::RateLimitDecision;

const FALLBACK_CLIENT_KEY: &str = "127.0.0.1";
const IMAGE_EXTENSIONS: [&str; 6] = ["svg", "png", "jpg", "jpeg", "gif", "webp"];

/// Admission gate in front of every matched route.
///
/// Keys on the forwarded client address, asks the external store, and
/// either passes the request through (tagging quota headers onto the
/// response) or short-circuits with 429 before the wrapped service runs.
/// If the store itself errors the request is admitted without headers:
/// availability over strictness, by explicit policy.
pub async fn rate_limit_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !is_rate_limited_path(request.uri().path()) {
        return next.run(request).await;
    }

    let Some(limiter) = state.container.limiter() else {
        return next.run(request).await;
    };

    let key = client_key(request.headers());

    match limiter.limit(&key).await {
        Ok(decision) if decision.success => {
            let mut response = next.run(request).await;
            apply_quota_headers(response.headers_mut(), &decision);
            response
        }
        Ok(decision) => {
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(ErrorBody {
                    error: "Too many requests".to_string(),
                }),
            )
                .into_response();
            apply_quota_headers(response.headers_mut(), &decision);
            response
        }
        Err(e) => {
            warn!("Rate limit store unavailable, admitting request: {e}");
            next.run(request).await
        }
    }
}

/// Client identifier: forwarded address when present, loopback otherwise.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .unwrap_or(FALLBACK_CLIENT_KEY)
        .to_string()
}

/// Two matcher rules under one policy: every API route, and every page
/// route that is not a static asset, favicon, or image file.
fn is_rate_limited_path(path: &str) -> bool {
    if path.starts_with("/api/") {
        return true;
    }
    if path.starts_with("/static/") || path == "/favicon.ico" {
        return false;
    }
    if let Some((_, ext)) = path.rsplit_once('.') {
        if IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            return false;
        }
    }
    true
}

fn apply_quota_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    headers.insert("X-RateLimit-Limit", HeaderValue::from(decision.limit));
    headers.insert("X-RateLimit-Remaining", HeaderValue::from(decision.remaining));
    headers.insert("X-RateLimit-Reset", HeaderValue::from(decision.reset));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_routes_are_always_limited() {
        assert!(is_rate_limited_path("/api/chat"));
        assert!(is_rate_limited_path("/api/process-urls"));
        assert!(is_rate_limited_path("/api/anything/else"));
    }

    #[test]
    fn test_page_routes_are_limited() {
        assert!(is_rate_limited_path("/"));
        assert!(is_rate_limited_path("/about"));
    }

    #[test]
    fn test_assets_are_excluded() {
        assert!(!is_rate_limited_path("/static/app.css"));
        assert!(!is_rate_limited_path("/favicon.ico"));
        assert!(!is_rate_limited_path("/logo.svg"));
        assert!(!is_rate_limited_path("/photos/cat.JPEG"));
        assert!(!is_rate_limited_path("/banner.webp"));
    }

    #[test]
    fn test_non_image_extensions_are_limited() {
        assert!(is_rate_limited_path("/report.pdf"));
        assert!(is_rate_limited_path("/data.json"));
    }

    #[test]
    fn test_client_key_defaults_to_loopback() {
        let headers = HeaderMap::new();
        assert_eq!(client_key(&headers), "127.0.0.1");

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.7"));
        assert_eq!(client_key(&headers), "10.0.0.7");
    }
}
