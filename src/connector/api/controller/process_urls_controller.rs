use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::connector::api::controller::internal_error;
use crate::connector::api::AppState;
use crate::domain::DomainError;

const PROCESS_URLS_ERROR: &str = "Failed to process URLs";

#[derive(Deserialize)]
struct ProcessUrlsRequest {
    urls: Vec<String>,
}

#[derive(Serialize)]
struct ProcessUrlsResponse {
    summary: String,
}

/// `POST /api/process-urls` — fetch every URL, summarize the combined
/// document, return one summary. All-or-nothing: any fetch or completion
/// failure yields the fixed 500 shape, never partial output.
pub async fn process_urls(State(state): State<AppState>, body: Bytes) -> Response {
    match handle(&state, &body).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            error!("Error processing URLs: {e}");
            internal_error(PROCESS_URLS_ERROR)
        }
    }
}

async fn handle(state: &AppState, body: &[u8]) -> Result<ProcessUrlsResponse, DomainError> {
    let request: ProcessUrlsRequest = serde_json::from_slice(body)
        .map_err(|e| DomainError::invalid_input(format!("malformed process-urls request: {e}")))?;

    let summary = state
        .container
        .summarize_use_case()
        .execute(&request.urls)
        .await?;

    Ok(ProcessUrlsResponse { summary })
}
