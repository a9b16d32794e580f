use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ContentFetcher;
use crate::domain::DomainError;

/// Scripted [`ContentFetcher`] test double keyed by URL.
///
/// Unscripted URLs fail the fetch, mirroring a network error.
pub struct MockFetcher {
    responses: Mutex<HashMap<String, Result<String, String>>>,
    calls: AtomicUsize,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn script(&self, url: impl Into<String>, response: Result<String, String>) {
        self.responses
            .lock()
            .expect("responses lock")
            .insert(url.into(), response);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentFetcher for MockFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.lock().expect("responses lock").get(url) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(msg)) => Err(DomainError::fetch(format!("{url}: {msg}"))),
            None => Err(DomainError::fetch(format!("{url}: no response scripted"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unscripted_url_fails() {
        let mock = MockFetcher::new();
        assert!(mock.fetch_text("http://a.example/").await.is_err());
        assert_eq!(mock.calls(), 1);
    }
}
