use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::CompletionClient;
use crate::domain::{ChatTurn, DomainError};

/// A request as seen by the mock, recorded for assertions.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub system: String,
    pub turns: Vec<ChatTurn>,
}

/// Scripted [`CompletionClient`] test double.
///
/// Replies are consumed in order; `Err` entries become upstream errors.
/// When the script runs out, a fixed placeholder reply is returned so
/// tests that only care about call counts keep working.
pub struct MockCompletion {
    replies: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    calls: AtomicUsize,
}

impl MockCompletion {
    pub fn new() -> Self {
        Self::with_replies(vec![])
    }

    pub fn with_replies(replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(&self, system: &str, turns: &[ChatTurn]) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("requests lock")
            .push(RecordedRequest {
                system: system.to_string(),
                turns: turns.to_vec(),
            });

        match self.replies.lock().expect("replies lock").pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(msg)) => Err(DomainError::upstream(msg)),
            None => Ok("mock reply".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[tokio::test]
    async fn test_replies_consumed_in_order() {
        let mock = MockCompletion::with_replies(vec![Ok("one".into()), Err("two".into())]);
        let turns = [ChatTurn::new(Role::User, "hi")];

        assert_eq!(mock.complete("sys", &turns).await.unwrap(), "one");
        assert!(mock.complete("sys", &turns).await.is_err());
        assert_eq!(mock.complete("sys", &turns).await.unwrap(), "mock reply");
        assert_eq!(mock.calls(), 3);
    }
}
