//! Rate limiter configuration.
//!
//! Per-route-class windows and quotas are compile-time constants
//! (enumerated per class); this section only controls the store sweeper
//! and the global on/off switch.

use serde::{Deserialize, Serialize};

/// Rate limiter runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether rate limiting is enforced at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Interval between sweeps of expired store entries, in seconds.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_sweep_interval() -> u64 {
    300
}
