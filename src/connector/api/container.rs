use std::sync::Arc;

use tracing::warn;

use crate::application::{
    ChatCompletionUseCase, ChatSession, CompletionClient, ContentFetcher, RateLimiter,
    SummarizeUrlsUseCase,
};
use crate::connector::adapter::{HttpFetcher, OpenAiClient, RestRateLimiter};
use crate::domain::RateLimitPolicy;

/// Wires adapters to use cases and hands them out per request.
///
/// All handler state is request-local; the container itself only holds
/// shared, immutable service handles.
pub struct Container {
    completion: Arc<dyn CompletionClient>,
    fetcher: Arc<dyn ContentFetcher>,
    limiter: Option<Arc<dyn RateLimiter>>,
    policy: RateLimitPolicy,
}

impl Container {
    /// Build the production wiring from environment variables. A missing
    /// `RATELIMIT_URL` disables the gate, which is equivalent to a
    /// permanently failed-open store.
    pub fn from_env() -> Self {
        let policy = RateLimitPolicy::default();
        let limiter = RestRateLimiter::from_env(policy)
            .map(|l| Arc::new(l) as Arc<dyn RateLimiter>);
        if limiter.is_none() {
            warn!("RATELIMIT_URL is not set; rate limiting disabled (fail-open)");
        }

        Self::with_services(
            Arc::new(OpenAiClient::from_env()),
            Arc::new(HttpFetcher::new()),
            limiter,
            policy,
        )
    }

    pub fn with_services(
        completion: Arc<dyn CompletionClient>,
        fetcher: Arc<dyn ContentFetcher>,
        limiter: Option<Arc<dyn RateLimiter>>,
        policy: RateLimitPolicy,
    ) -> Self {
        Self {
            completion,
            fetcher,
            limiter,
            policy,
        }
    }

    pub fn chat_use_case(&self) -> ChatCompletionUseCase {
        ChatCompletionUseCase::new(self.completion.clone())
    }

    pub fn summarize_use_case(&self) -> SummarizeUrlsUseCase {
        SummarizeUrlsUseCase::new(self.fetcher.clone(), self.completion.clone())
    }

    /// A fresh single-writer session over the same backing services.
    pub fn session(&self) -> ChatSession {
        ChatSession::new(self.chat_use_case(), self.summarize_use_case())
    }

    pub fn limiter(&self) -> Option<Arc<dyn RateLimiter>> {
        self.limiter.clone()
    }

    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }
}
