//! # shophub-api
//!
//! HTTP API layer for Shophub built on Axum.
//!
//! Provides all REST endpoints, middleware (rate limiting, permission
//! guards, CORS, logging), DTOs, and error mapping. Every privileged
//! route composes as rate limiter → permission verifier → domain
//! service, in that order.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
