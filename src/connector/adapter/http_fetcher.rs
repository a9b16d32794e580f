use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ContentFetcher;
use crate::domain::DomainError;

/// Per-fetch deadline; a hung page fails the batch instead of hanging it.
const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Retrieves raw text from arbitrary URLs over HTTP.
///
/// Non-success statuses and undecodable bodies are reported as fetch
/// errors; the caller decides what a failed fetch means for the batch.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, DomainError> {
        debug!("Fetching {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::fetch(format!("{url}: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::fetch(format!(
                "{url}: returned {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| DomainError::fetch(format!("{url}: failed to read body: {e}")))
    }
}
