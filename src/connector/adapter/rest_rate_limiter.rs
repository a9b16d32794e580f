use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::RateLimiter;
use crate::domain::{DomainError, RateLimitDecision, RateLimitPolicy};

const LIMIT_PATH: &str = "/limit";
/// Short deadline: a slow store must not stall admission, it should just
/// trip the gate's fail-open path quickly.
const STORE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(serde::Serialize)]
struct LimitRequest<'a> {
    key: &'a str,
    limit: u64,
    window_secs: u64,
}

#[derive(Deserialize)]
struct LimitResponse {
    success: bool,
    limit: u64,
    remaining: u64,
    reset: u64,
}

/// Client for a hosted sliding-window rate-limit store.
///
/// Forwards the client key plus the configured policy and interprets the
/// store's verdict; the window arithmetic happens entirely in the store.
/// Errors surface as [`DomainError::RateLimitStore`], which the gate
/// recovers by failing open.
pub struct RestRateLimiter {
    client: reqwest::Client,
    token: String,
    policy: RateLimitPolicy,
    /// Full endpoint URL (base + LIMIT_PATH).
    url: String,
}

impl RestRateLimiter {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        policy: RateLimitPolicy,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{LIMIT_PATH}", base.trim_end_matches('/'));
        Self {
            client: reqwest::Client::builder()
                .timeout(STORE_TIMEOUT)
                .build()
                .unwrap_or_default(),
            token: token.into(),
            policy,
            url,
        }
    }

    /// Construct from `RATELIMIT_URL` and `RATELIMIT_TOKEN`. Returns `None`
    /// when no store endpoint is configured, which disables the gate.
    pub fn from_env(policy: RateLimitPolicy) -> Option<Self> {
        let base = std::env::var("RATELIMIT_URL").ok()?;
        let token = std::env::var("RATELIMIT_TOKEN").unwrap_or_default();
        Some(Self::new(base, token, policy))
    }
}

#[async_trait]
impl RateLimiter for RestRateLimiter {
    async fn limit(&self, key: &str) -> Result<RateLimitDecision, DomainError> {
        let request = LimitRequest {
            key,
            limit: self.policy.limit(),
            window_secs: self.policy.window_secs(),
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::rate_limit_store(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::rate_limit_store(format!(
                "store returned {}",
                response.status()
            )));
        }

        let verdict: LimitResponse = response
            .json()
            .await
            .map_err(|e| DomainError::rate_limit_store(format!("failed to parse response: {e}")))?;

        Ok(RateLimitDecision {
            success: verdict.success,
            limit: verdict.limit,
            remaining: verdict.remaining,
            reset: verdict.reset,
        })
    }
}
