use async_trait::async_trait;

use crate::domain::DomainError;

/// Retrieves the raw text content of an arbitrary URL.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, DomainError>;
}
