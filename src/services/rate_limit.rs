use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Fixed-window request counter held in process memory
///
/// A window opens with the first request for a key and lasts `window`.
/// Entries expire `window` after they were created (the counter is mutated
/// in place, so reads never extend the lifetime), which also sweeps stale
/// keys out of memory. The cache has no capacity bound: expiry is the only
/// way a window leaves, so a live window is never evicted and reset early.
pub struct RateLimiter {
    windows: moka::future::Cache<String, Arc<AtomicU32>>,
    max_requests: u32,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(max_requests: u32, window: Duration) -> Self {
        let windows = moka::future::Cache::builder()
            .time_to_live(window)
            .build();

        Self {
            windows,
            max_requests,
        }
    }

    /// Count a request against `key`; `false` means the limit is exhausted
    pub async fn check(&self, key: &str) -> bool {
        let counter = self
            .windows
            .get_with(key.to_string(), async { Arc::new(AtomicU32::new(0)) })
            .await;

        let previous = counter.fetch_add(1, Ordering::SeqCst);
        let allowed = previous < self.max_requests;

        if !allowed {
            tracing::debug!("Rate limit hit for {} ({} requests)", key, previous + 1);
        }

        allowed
    }
}

/// Rate limit key builder
pub struct RateLimitKey;

impl RateLimitKey {
    /// Build a rate limit key for the apply endpoint
    pub fn apply(user_id: &str) -> String {
        format!("apply:{}", user_id)
    }
}
