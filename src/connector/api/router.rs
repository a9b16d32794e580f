use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use super::container::Container;
use super::controller::{chat, process_urls};
use super::page::index;
use super::rate_limit::rate_limit_gate;

/// Shared handler state: one container for the process lifetime.
#[derive(Clone)]
pub struct AppState {
    pub(crate) container: Arc<Container>,
}

/// Assemble the full HTTP surface: the two API endpoints, the chat page,
/// and the rate-limit gate wrapped around all of it.
pub fn build_router(container: Arc<Container>) -> Router {
    let state = AppState { container };

    Router::new()
        .route("/", get(index))
        .route("/api/chat", post(chat))
        .route("/api/process-urls", post(process_urls))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_gate,
        ))
        .with_state(state)
}
