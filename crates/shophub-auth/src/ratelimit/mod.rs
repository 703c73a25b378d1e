//! Per-route-class request throttling.
//!
//! A fixed-window counter keyed by `(client identity, route class)`,
//! applied before permission verification. Throttling is defense in
//! depth, not a security boundary: internal limiter errors fail OPEN,
//! and the identity used for keys is deliberately non-authoritative.

mod identity;
mod limiter;
mod memory;
mod rules;
mod store;
mod sweeper;

pub use identity::throttle_key;
pub use limiter::{RateLimitDecision, RateLimiter};
pub use memory::FixedWindowStore;
pub use rules::{RateLimitRule, RouteClass};
pub use store::{RateLimitSnapshot, RateLimitStore};
pub use sweeper::spawn_sweeper;
