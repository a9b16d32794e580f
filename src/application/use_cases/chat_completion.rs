use std::sync::Arc;

use tracing::info;

use crate::application::CompletionClient;
use crate::domain::{ChatTurn, DomainError, Message};

const SYSTEM_PROMPT: &str = "You are a helpful assistant that provides answers with relevant \
     source citations when available.";

/// The assistant's reply plus the source URLs carried over from the input
/// history.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub content: String,
    pub sources: Vec<String>,
}

/// Requests one completion for the full conversation history.
///
/// The fixed system instruction is injected per request and never becomes
/// part of stored state. `sources` on the reply is the in-order flatten of
/// every input message's attributions, regardless of role — propagation of
/// prior sources, not citation extraction from the reply text.
pub struct ChatCompletionUseCase {
    completion: Arc<dyn CompletionClient>,
}

impl ChatCompletionUseCase {
    pub fn new(completion: Arc<dyn CompletionClient>) -> Self {
        Self { completion }
    }

    pub async fn execute(&self, messages: &[Message]) -> Result<ChatReply, DomainError> {
        if messages.is_empty() {
            return Err(DomainError::invalid_input("conversation history is empty"));
        }

        // Role/content forwarded verbatim; sources are dropped from the
        // model-facing payload.
        let turns: Vec<ChatTurn> = messages
            .iter()
            .map(|m| ChatTurn::new(m.role(), m.content()))
            .collect();

        let sources: Vec<String> = messages
            .iter()
            .filter_map(|m| m.sources())
            .flatten()
            .cloned()
            .collect();

        info!("Requesting chat completion for {} turns", turns.len());

        let content = self.completion.complete(SYSTEM_PROMPT, &turns).await?;

        Ok(ChatReply { content, sources })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::MockCompletion;
    use crate::domain::Role;

    fn use_case(mock: &Arc<MockCompletion>) -> ChatCompletionUseCase {
        ChatCompletionUseCase::new(Arc::clone(mock) as Arc<dyn CompletionClient>)
    }

    #[tokio::test]
    async fn test_first_message_payload_is_system_plus_user() {
        let mock = Arc::new(MockCompletion::with_replies(vec![Ok("X is Y.".into())]));
        let messages = vec![Message::user("What is X?")];

        let reply = use_case(&mock).execute(&messages).await.unwrap();

        assert_eq!(reply.content, "X is Y.");
        assert!(reply.sources.is_empty());

        let recorded = mock.requests();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].system, SYSTEM_PROMPT);
        assert_eq!(
            recorded[0].turns,
            vec![ChatTurn::new(Role::User, "What is X?")]
        );
    }

    #[tokio::test]
    async fn test_sources_flattened_in_input_order_regardless_of_role() {
        let mock = Arc::new(MockCompletion::with_replies(vec![Ok("ok".into())]));
        let messages = vec![
            Message::user("summarize these").with_sources(vec!["http://a.example/".into()]),
            Message::assistant("summary").with_sources(vec![
                "http://b.example/".into(),
                "http://c.example/".into(),
            ]),
            Message::user("and now?"),
        ];

        let reply = use_case(&mock).execute(&messages).await.unwrap();

        assert_eq!(
            reply.sources,
            vec!["http://a.example/", "http://b.example/", "http://c.example/"]
        );
    }

    #[tokio::test]
    async fn test_sources_never_reach_the_model_payload() {
        let mock = Arc::new(MockCompletion::with_replies(vec![Ok("ok".into())]));
        let messages =
            vec![Message::assistant("summary").with_sources(vec!["http://a.example/".into()])];

        use_case(&mock).execute(&messages).await.unwrap();

        let recorded = mock.requests();
        assert_eq!(
            recorded[0].turns,
            vec![ChatTurn::new(Role::Assistant, "summary")]
        );
    }

    #[tokio::test]
    async fn test_empty_history_is_invalid_input() {
        let mock = Arc::new(MockCompletion::new());
        let err = use_case(&mock).execute(&[]).await.unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let mock = Arc::new(MockCompletion::with_replies(vec![Err("boom".into())]));
        let err = use_case(&mock)
            .execute(&[Message::user("hi")])
            .await
            .unwrap_err();
        assert!(err.is_upstream());
    }
}
