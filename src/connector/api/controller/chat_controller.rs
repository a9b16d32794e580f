use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::connector::api::controller::internal_error;
use crate::connector::api::AppState;
use crate::domain::{DomainError, Message, Role};

const CHAT_ERROR: &str = "Failed to process chat message";

#[derive(Deserialize)]
struct ChatRequest {
    messages: Vec<IncomingMessage>,
}

#[derive(Deserialize)]
struct IncomingMessage {
    role: Role,
    content: String,
    #[serde(default)]
    sources: Option<Vec<String>>,
}

#[derive(Serialize)]
struct ChatResponse {
    content: String,
    sources: Vec<String>,
}

/// `POST /api/chat` — forward the full history to the completion model and
/// return the reply plus carried-over sources. Every failure, malformed
/// bodies included, collapses into the one fixed 500 shape.
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Response {
    match handle(&state, &body).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            error!("Error in chat: {e}");
            internal_error(CHAT_ERROR)
        }
    }
}

async fn handle(state: &AppState, body: &[u8]) -> Result<ChatResponse, DomainError> {
    // Parsed by hand so a non-JSON body takes the same generic failure
    // path as an upstream error instead of an extractor rejection.
    let request: ChatRequest = serde_json::from_slice(body)
        .map_err(|e| DomainError::invalid_input(format!("malformed chat request: {e}")))?;

    let messages: Vec<Message> = request
        .messages
        .into_iter()
        .map(|incoming| {
            let message = Message::new(incoming.role, incoming.content);
            match incoming.sources {
                Some(sources) => message.with_sources(sources),
                None => message,
            }
        })
        .collect();

    let reply = state.container.chat_use_case().execute(&messages).await?;

    Ok(ChatResponse {
        content: reply.content,
        sources: reply.sources,
    })
}
