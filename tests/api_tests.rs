//! Integration tests for the HTTP surface.
//!
//! Each test drives the assembled router in-process with scripted
//! adapters, covering the endpoint contracts and the rate-limit gate.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use sourcechat::{
    build_router, CompletionClient, Container, ContentFetcher, MockCompletion, MockFetcher,
    MockRateLimiter, RateLimitPolicy, RateLimiter,
};

struct TestEnv {
    router: Router,
    completion: Arc<MockCompletion>,
    #[allow(dead_code)]
    fetcher: Arc<MockFetcher>,
    limiter: Option<Arc<MockRateLimiter>>,
}

fn setup(
    completion: MockCompletion,
    fetcher: MockFetcher,
    limiter: Option<MockRateLimiter>,
) -> TestEnv {
    let completion = Arc::new(completion);
    let fetcher = Arc::new(fetcher);
    let limiter = limiter.map(Arc::new);

    let container = Container::with_services(
        Arc::clone(&completion) as Arc<dyn CompletionClient>,
        Arc::clone(&fetcher) as Arc<dyn ContentFetcher>,
        limiter
            .as_ref()
            .map(|l| Arc::clone(l) as Arc<dyn RateLimiter>),
        RateLimitPolicy::default(),
    );

    TestEnv {
        router: build_router(Arc::new(container)),
        completion,
        fetcher,
        limiter,
    }
}

async fn post_json(router: &Router, path: &str, body: &str) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, value)
}

async fn get(router: &Router, path: &str) -> StatusCode {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .expect("request");
    let response = router.clone().oneshot(request).await.expect("response");
    response.status()
}

#[tokio::test]
async fn test_chat_returns_reply_with_flattened_sources() {
    let env = setup(
        MockCompletion::with_replies(vec![Ok("an answer".into())]),
        MockFetcher::new(),
        None,
    );

    let body = json!({
        "messages": [
            { "role": "assistant", "content": "summary", "sources": ["http://a.example/"] },
            { "role": "user", "content": "tell me more" },
        ]
    });
    let (status, _, value) = post_json(&env.router, "/api/chat", &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["content"], "an answer");
    assert_eq!(value["sources"], json!(["http://a.example/"]));
}

#[tokio::test]
async fn test_first_chat_message_has_empty_sources() {
    let env = setup(
        MockCompletion::with_replies(vec![Ok("X is Y.".into())]),
        MockFetcher::new(),
        None,
    );

    let body = json!({ "messages": [{ "role": "user", "content": "What is X?" }] });
    let (status, _, value) = post_json(&env.router, "/api/chat", &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["sources"], json!([]));

    // system instruction + the one user turn, nothing else
    let recorded = env.completion.requests();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].turns.len(), 1);
}

#[tokio::test]
async fn test_malformed_chat_body_yields_fixed_500_shape() {
    let env = setup(MockCompletion::new(), MockFetcher::new(), None);

    let (status, _, value) = post_json(&env.router, "/api/chat", "not json").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["error"], "Failed to process chat message");
    assert_eq!(env.completion.calls(), 0);
}

#[tokio::test]
async fn test_completion_failure_yields_fixed_500_shape() {
    let env = setup(
        MockCompletion::with_replies(vec![Err("api down".into())]),
        MockFetcher::new(),
        None,
    );

    let body = json!({ "messages": [{ "role": "user", "content": "hi" }] });
    let (status, _, value) = post_json(&env.router, "/api/chat", &body.to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["error"], "Failed to process chat message");
}

#[tokio::test]
async fn test_process_urls_returns_single_summary() {
    let fetcher = MockFetcher::new();
    fetcher.script("http://a.example/", Ok("Hello".into()));
    fetcher.script("http://b.example/", Ok("World".into()));
    let env = setup(
        MockCompletion::with_replies(vec![Ok("a summary".into())]),
        fetcher,
        None,
    );

    let body = json!({ "urls": ["http://a.example/", "http://b.example/"] });
    let (status, _, value) = post_json(&env.router, "/api/process-urls", &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["summary"], "a summary");
    assert_eq!(env.completion.calls(), 1);
}

#[tokio::test]
async fn test_process_urls_fetch_failure_never_returns_partial_output() {
    let fetcher = MockFetcher::new();
    fetcher.script("http://a.example/", Ok("Hello".into()));
    fetcher.script("http://b.example/", Err("refused".into()));
    let env = setup(MockCompletion::new(), fetcher, None);

    let body = json!({ "urls": ["http://a.example/", "http://b.example/"] });
    let (status, _, value) = post_json(&env.router, "/api/process-urls", &body.to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["error"], "Failed to process URLs");
    assert!(value.get("summary").is_none());
    assert_eq!(env.completion.calls(), 0);
}

#[tokio::test]
async fn test_sixth_request_in_window_is_rejected() {
    let env = setup(
        MockCompletion::new(),
        MockFetcher::new(),
        Some(MockRateLimiter::with_quota(5)),
    );
    let body = json!({ "messages": [{ "role": "user", "content": "hi" }] }).to_string();

    for n in 0..5 {
        let (status, headers, _) = post_json(&env.router, "/api/chat", &body).await;
        assert_eq!(status, StatusCode::OK, "request {} should be admitted", n + 1);
        assert_eq!(headers["X-RateLimit-Limit"], "5");
        assert_eq!(
            headers["X-RateLimit-Remaining"],
            (4 - n).to_string().as_str()
        );
    }

    let (status, headers, value) = post_json(&env.router, "/api/chat", &body).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(value["error"], "Too many requests");
    assert_eq!(headers["X-RateLimit-Remaining"], "0");
    assert!(headers.contains_key("X-RateLimit-Reset"));

    // The wrapped service never ran for the rejected request.
    assert_eq!(env.completion.calls(), 5);
}

#[tokio::test]
async fn test_store_error_fails_open_without_quota_headers() {
    let env = setup(
        MockCompletion::with_replies(vec![Ok("ok".into())]),
        MockFetcher::new(),
        Some(MockRateLimiter::with_decisions(vec![Err(
            "store down".into(),
        )])),
    );

    let body = json!({ "messages": [{ "role": "user", "content": "hi" }] });
    let (status, headers, value) = post_json(&env.router, "/api/chat", &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["content"], "ok");
    assert!(!headers.contains_key("X-RateLimit-Limit"));
}

#[tokio::test]
async fn test_excluded_asset_paths_bypass_the_gate() {
    let env = setup(
        MockCompletion::new(),
        MockFetcher::new(),
        Some(MockRateLimiter::with_quota(0)),
    );

    let status = get(&env.router, "/favicon.ico").await;
    assert_ne!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(env.limiter.as_ref().unwrap().calls(), 0);
}

#[tokio::test]
async fn test_page_routes_are_rate_limited() {
    let env = setup(
        MockCompletion::new(),
        MockFetcher::new(),
        Some(MockRateLimiter::with_quota(0)),
    );

    let status = get(&env.router, "/").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_index_page_is_served() {
    let env = setup(MockCompletion::new(), MockFetcher::new(), None);
    let status = get(&env.router, "/").await;
    assert_eq!(status, StatusCode::OK);
}
