//! Axum middleware: throttling, permission guards, CORS, logging.

pub mod cors;
pub mod logging;
pub mod permission;
pub mod rate_limit;
