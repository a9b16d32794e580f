use serde::{Deserialize, Serialize};

/// Outcome of asking the sliding-window store about one request.
/// Ephemeral: valid only for the lifetime of that request/response
/// exchange.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateLimitDecision {
    pub success: bool,
    pub limit: u64,
    pub remaining: u64,
    /// Epoch milliseconds at which the current window resets.
    pub reset: u64,
}

impl RateLimitDecision {
    pub fn admit(limit: u64, remaining: u64, reset: u64) -> Self {
        Self {
            success: true,
            limit,
            remaining,
            reset,
        }
    }

    pub fn deny(limit: u64, reset: u64) -> Self {
        Self {
            success: false,
            limit,
            remaining: 0,
            reset,
        }
    }
}

/// Admission policy evaluated by the external store: N requests per
/// sliding window. The window algorithm itself lives in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    limit: u64,
    window_secs: u64,
}

impl RateLimitPolicy {
    pub fn new(limit: u64, window_secs: u64) -> Self {
        Self { limit, window_secs }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn window_secs(&self) -> u64 {
        self.window_secs
    }
}

impl Default for RateLimitPolicy {
    /// 5 admissions per 10 seconds.
    fn default() -> Self {
        Self::new(5, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_five_per_ten_seconds() {
        let policy = RateLimitPolicy::default();
        assert_eq!(policy.limit(), 5);
        assert_eq!(policy.window_secs(), 10);
    }

    #[test]
    fn test_deny_has_zero_remaining() {
        let decision = RateLimitDecision::deny(5, 1_000);
        assert!(!decision.success);
        assert_eq!(decision.remaining, 0);
    }
}
