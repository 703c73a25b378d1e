//! The rate limiter itself: rule lookup, store increment, decision.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::rules::RouteClass;
use super::store::RateLimitStore;

/// Outcome of a rate-limit check, with everything the HTTP layer needs
/// to build the `X-RateLimit-*` and `Retry-After` headers.
#[derive(Debug, Clone)]
pub struct RateLimitDecision {
    /// True when the request must be rejected with 429.
    pub limited: bool,
    /// Quota for the route class.
    pub limit: u32,
    /// Requests left in the current window (never negative).
    pub remaining: u32,
    /// When the current window resets.
    pub reset_at: DateTime<Utc>,
    /// Seconds until the window resets, for `Retry-After`.
    pub retry_after_secs: i64,
    /// Human-readable rejection message for the route class.
    pub message: &'static str,
}

/// Fixed-window request throttle over an injectable store.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
}

impl RateLimiter {
    /// Create a limiter over the given store.
    pub fn new(store: Arc<dyn RateLimitStore>) -> Self {
        Self { store }
    }

    /// The underlying store, for the background sweeper.
    pub fn store(&self) -> Arc<dyn RateLimitStore> {
        Arc::clone(&self.store)
    }

    /// Count one request against `key` and decide whether to admit it.
    ///
    /// Fails OPEN: if the store errors, the request is admitted and the
    /// failure is logged. Throttling is defense in depth; availability
    /// wins over strictness here.
    pub async fn check(&self, key: &str, class: RouteClass) -> RateLimitDecision {
        let rule = class.rule();

        let snapshot = match self.store.increment(key, rule.window).await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                tracing::error!(%error, %class, "rate limit store failed, admitting request");
                return RateLimitDecision {
                    limited: false,
                    limit: rule.max_requests,
                    remaining: rule.max_requests,
                    reset_at: Utc::now(),
                    retry_after_secs: 0,
                    message: rule.message,
                };
            }
        };

        let limited = snapshot.count > rule.max_requests;
        let remaining = rule.max_requests.saturating_sub(snapshot.count);
        let retry_after_secs = (snapshot.reset_at - Utc::now()).num_seconds().max(0);

        if limited {
            tracing::warn!(key, %class, count = snapshot.count, "rate limit exceeded");
        }

        RateLimitDecision {
            limited,
            limit: rule.max_requests,
            remaining,
            reset_at: snapshot.reset_at,
            retry_after_secs,
            message: rule.message,
        }
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish()
    }
}
