//! In-memory fixed-window counter store.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use shophub_core::result::AppResult;

use super::store::{RateLimitSnapshot, RateLimitStore};

#[derive(Debug, Clone, Copy)]
struct WindowRecord {
    count: u32,
    reset_at: DateTime<Utc>,
    last_request: DateTime<Utc>,
}

/// Process-local fixed-window store.
///
/// This is an honest fixed-window counter: the count resets to zero at
/// window boundaries, so a burst of up to 2×quota is possible across a
/// boundary. Entries are not persisted across restarts, and limits are
/// under-enforced proportionally to instance count when scaled
/// horizontally — acceptable for a best-effort throttle, since the
/// permission verifier is the security boundary.
#[derive(Debug, Default)]
pub struct FixedWindowStore {
    records: Mutex<HashMap<String, WindowRecord>>,
}

impl FixedWindowStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment with an explicit clock, for deterministic tests.
    pub async fn increment_at(
        &self,
        key: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> RateLimitSnapshot {
        let window = chrono::Duration::from_std(window).unwrap_or(chrono::Duration::minutes(10));
        let mut records = self.records.lock().await;

        let record = records.entry(key.to_string()).or_insert(WindowRecord {
            count: 0,
            reset_at: now + window,
            last_request: now,
        });

        if now >= record.reset_at {
            record.count = 0;
            record.reset_at = now + window;
        }

        record.count += 1;
        record.last_request = now;

        RateLimitSnapshot {
            count: record.count,
            reset_at: record.reset_at,
        }
    }

    /// Remove entries whose window has passed, bounding memory.
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, record| record.reset_at > now);
        before - records.len()
    }

    /// Number of live entries (for monitoring and tests).
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Whether the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl RateLimitStore for FixedWindowStore {
    async fn increment(&self, key: &str, window: Duration) -> AppResult<RateLimitSnapshot> {
        Ok(self.increment_at(key, window, Utc::now()).await)
    }

    async fn sweep(&self) -> AppResult<usize> {
        Ok(self.sweep_at(Utc::now()).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(900);

    #[tokio::test]
    async fn test_counts_within_window() {
        let store = FixedWindowStore::new();
        let t0 = Utc::now();

        for expected in 1..=5u32 {
            let snap = store.increment_at("k", WINDOW, t0).await;
            assert_eq!(snap.count, expected);
        }
    }

    #[tokio::test]
    async fn test_window_resets_after_elapse() {
        let store = FixedWindowStore::new();
        let t0 = Utc::now();

        for _ in 0..6 {
            store.increment_at("k", WINDOW, t0).await;
        }

        // Exactly at the boundary the window resets.
        let t1 = t0 + chrono::Duration::seconds(900);
        let snap = store.increment_at("k", WINDOW, t1).await;
        assert_eq!(snap.count, 1);
        assert_eq!(snap.reset_at, t1 + chrono::Duration::seconds(900));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = FixedWindowStore::new();
        let t0 = Utc::now();

        store.increment_at("a", WINDOW, t0).await;
        store.increment_at("a", WINDOW, t0).await;
        let snap = store.increment_at("b", WINDOW, t0).await;
        assert_eq!(snap.count, 1);
    }

    #[tokio::test]
    async fn test_sweep_removes_expired_entries() {
        let store = FixedWindowStore::new();
        let t0 = Utc::now();

        store.increment_at("old", WINDOW, t0).await;
        store
            .increment_at("new", WINDOW, t0 + chrono::Duration::seconds(600))
            .await;

        let removed = store.sweep_at(t0 + chrono::Duration::seconds(901)).await;
        assert_eq!(removed, 1);
        assert_eq!(store.len().await, 1);
    }
}
