use std::sync::Arc;

use futures_util::future::try_join_all;
use tracing::info;

use crate::application::{CompletionClient, ContentFetcher};
use crate::domain::{ChatTurn, DomainError, Role};

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that summarizes content from multiple URLs.";
const USER_PREFIX: &str = "Please summarize the following content from different URLs: ";

/// Fetches every URL in a batch and asks the model for one combined
/// summary.
///
/// Fetches run concurrently with no bound on parallelism; a single fetch
/// failure fails the whole batch — there is no partial-success mode. On
/// success the texts are concatenated in input order, separated by a blank
/// line, and exactly one completion request is issued. Tagging the result
/// with the input URLs is the caller's job.
pub struct SummarizeUrlsUseCase {
    fetcher: Arc<dyn ContentFetcher>,
    completion: Arc<dyn CompletionClient>,
}

impl SummarizeUrlsUseCase {
    pub fn new(fetcher: Arc<dyn ContentFetcher>, completion: Arc<dyn CompletionClient>) -> Self {
        Self {
            fetcher,
            completion,
        }
    }

    pub async fn execute(&self, urls: &[String]) -> Result<String, DomainError> {
        if urls.is_empty() {
            return Err(DomainError::invalid_input("url batch is empty"));
        }

        info!("Fetching {} URLs for summarization", urls.len());

        let texts = try_join_all(urls.iter().map(|url| self.fetcher.fetch_text(url))).await?;

        let combined = texts.join("\n\n");
        let user_turn = ChatTurn::new(Role::User, format!("{USER_PREFIX}{combined}"));

        self.completion.complete(SYSTEM_PROMPT, &[user_turn]).await
    }
}
