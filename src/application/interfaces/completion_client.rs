use async_trait::async_trait;

use crate::domain::{ChatTurn, DomainError};

/// An interface for sending chat-style prompts to an LLM and receiving text
/// responses.
///
/// Implementors encapsulate transport, serialization, and vendor-specific
/// API details. Consumers (the use cases) remain decoupled from any
/// particular provider or HTTP client library.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a `system` instruction followed by the ordered `turns` and
    /// return the assistant's response text.
    async fn complete(&self, system: &str, turns: &[ChatTurn]) -> Result<String, DomainError>;
}
