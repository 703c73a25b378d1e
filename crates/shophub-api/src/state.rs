//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use shophub_auth::PermissionVerifier;
use shophub_auth::ratelimit::RateLimiter;
use shophub_core::config::AppConfig;
use shophub_service::{AccountService, CatalogService, IdentityService, RoleService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped (or internally `Arc`-backed) for cheap cloning across
/// tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// The permission verifier, the authoritative security boundary.
    pub verifier: Arc<PermissionVerifier>,
    /// The fixed-window rate limiter.
    pub rate_limiter: RateLimiter,
    /// Sign-in and role resolution.
    pub identity_service: Arc<IdentityService>,
    /// Password changes.
    pub account_service: Arc<AccountService>,
    /// User and role administration.
    pub role_service: Arc<RoleService>,
    /// Product catalog management.
    pub catalog_service: Arc<CatalogService>,
}
