//! Injectable rate-limit store abstraction.
//!
//! The store is the only mutable shared state on the server side. It is
//! a trait so the in-process map can be swapped for an external cache
//! in multi-instance deployments without touching call sites.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use shophub_core::result::AppResult;

/// Snapshot of one key's counter after an increment.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitSnapshot {
    /// Requests counted in the current window, including this one.
    pub count: u32,
    /// When the current window resets.
    pub reset_at: DateTime<Utc>,
}

/// Increment-or-create counter storage for the rate limiter.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Atomically create-or-reset-or-increment the counter for `key`
    /// with the given window, returning the post-increment snapshot.
    async fn increment(&self, key: &str, window: std::time::Duration)
        -> AppResult<RateLimitSnapshot>;

    /// Delete entries whose window has passed. Returns how many were
    /// removed.
    async fn sweep(&self) -> AppResult<usize>;
}
