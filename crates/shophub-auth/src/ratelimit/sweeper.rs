//! Background task that expires stale rate-limit counters.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::store::RateLimitStore;

/// Spawn the periodic sweeper. The task runs until `shutdown` flips to
/// `true`, removing expired counters every `interval`.
pub fn spawn_sweeper(
    store: Arc<dyn RateLimitStore>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first tick fires immediately; skip it.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match store.sweep().await {
                        Ok(removed) if removed > 0 => {
                            tracing::debug!(removed, "swept expired rate limit counters");
                        }
                        Ok(_) => {}
                        Err(error) => {
                            tracing::error!(%error, "rate limit sweep failed");
                        }
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::debug!("rate limit sweeper stopping");
                        break;
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratelimit::memory::FixedWindowStore;

    #[tokio::test]
    async fn test_sweeper_stops_on_shutdown() {
        let store = Arc::new(FixedWindowStore::new());
        let (tx, rx) = watch::channel(false);

        let handle = spawn_sweeper(store, Duration::from_secs(300), rx);
        tx.send(true).ok();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper should exit promptly")
            .expect("sweeper task should not panic");
    }
}
