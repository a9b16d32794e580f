use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::application::RateLimiter;
use crate::domain::{DomainError, RateLimitDecision, RateLimitPolicy};

/// Scripted [`RateLimiter`] test double.
///
/// Scripted decisions are consumed first; after that, behavior depends on
/// the constructor: `allow_all` admits everything, `with_quota` admits the
/// first N calls and denies the rest (a stand-in for the hosted window,
/// not a window implementation).
pub struct MockRateLimiter {
    policy: RateLimitPolicy,
    quota: Option<u64>,
    admitted: AtomicU64,
    scripted: Mutex<VecDeque<Result<RateLimitDecision, String>>>,
    calls: AtomicUsize,
}

impl MockRateLimiter {
    pub fn allow_all() -> Self {
        Self::build(None, vec![])
    }

    pub fn with_quota(quota: u64) -> Self {
        Self::build(Some(quota), vec![])
    }

    pub fn with_decisions(decisions: Vec<Result<RateLimitDecision, String>>) -> Self {
        Self::build(None, decisions)
    }

    fn build(quota: Option<u64>, scripted: Vec<Result<RateLimitDecision, String>>) -> Self {
        Self {
            policy: RateLimitPolicy::default(),
            quota,
            admitted: AtomicU64::new(0),
            scripted: Mutex::new(scripted.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn window_reset(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        now + self.policy.window_secs() * 1_000
    }
}

#[async_trait]
impl RateLimiter for MockRateLimiter {
    async fn limit(&self, _key: &str) -> Result<RateLimitDecision, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(decision) = self.scripted.lock().expect("scripted lock").pop_front() {
            return decision.map_err(DomainError::rate_limit_store);
        }

        let reset = self.window_reset();
        match self.quota {
            Some(quota) => {
                let used = self.admitted.fetch_add(1, Ordering::SeqCst);
                if used < quota {
                    Ok(RateLimitDecision::admit(quota, quota - used - 1, reset))
                } else {
                    Ok(RateLimitDecision::deny(quota, reset))
                }
            }
            None => Ok(RateLimitDecision::admit(
                self.policy.limit(),
                self.policy.limit() - 1,
                reset,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_quota_denies_after_n_admissions() {
        let mock = MockRateLimiter::with_quota(2);

        let first = mock.limit("1.2.3.4").await.unwrap();
        assert!(first.success);
        assert_eq!(first.remaining, 1);

        let second = mock.limit("1.2.3.4").await.unwrap();
        assert!(second.success);
        assert_eq!(second.remaining, 0);

        let third = mock.limit("1.2.3.4").await.unwrap();
        assert!(!third.success);
        assert_eq!(third.remaining, 0);
    }

    #[tokio::test]
    async fn test_scripted_error_surfaces_as_store_error() {
        let mock = MockRateLimiter::with_decisions(vec![Err("store down".into())]);
        let err = mock.limit("1.2.3.4").await.unwrap_err();
        assert!(matches!(err, DomainError::RateLimitStore(_)));
    }
}
