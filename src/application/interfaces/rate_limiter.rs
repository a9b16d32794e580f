use async_trait::async_trait;

use crate::domain::{DomainError, RateLimitDecision};

/// Admission check against an external sliding-window counter store.
///
/// The window algorithm is the store's responsibility; implementors only
/// forward the client key and interpret the store's answer. Errors from
/// this trait are recovered by the gate, which fails open.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn limit(&self, key: &str) -> Result<RateLimitDecision, DomainError>;
}
