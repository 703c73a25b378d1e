//! Application builder — wires state + router + middleware into an Axum app.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use shophub_auth::PermissionVerifier;
use shophub_auth::provider::HttpAuthProvider;
use shophub_auth::ratelimit::{FixedWindowStore, RateLimiter};
use shophub_core::config::AppConfig;
use shophub_core::result::AppResult;
use shophub_database::repositories::product::ProductRepository;
use shophub_database::repositories::profile::ProfileRepository;
use shophub_database::repositories::role_history::RoleHistoryRepository;
use shophub_service::{AccountService, CatalogService, IdentityService, RoleService};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Wire repositories, the auth provider, and services into `AppState`.
pub fn build_state(config: Arc<AppConfig>, db_pool: PgPool) -> AppResult<AppState> {
    let provider = Arc::new(HttpAuthProvider::new(&config.auth)?);
    let profiles = Arc::new(ProfileRepository::new(db_pool.clone()));
    let history = Arc::new(RoleHistoryRepository::new(db_pool.clone()));
    let products = Arc::new(ProductRepository::new(db_pool.clone()));

    let verifier = Arc::new(PermissionVerifier::new(
        provider.clone(),
        profiles.clone(),
    ));
    let rate_limiter = RateLimiter::new(Arc::new(FixedWindowStore::new()));

    let policy = shophub_auth::password::PasswordPolicy::new(
        config.auth.password_min_length,
        config.auth.password_max_length,
    );

    Ok(AppState {
        config,
        db_pool,
        verifier,
        rate_limiter,
        identity_service: Arc::new(IdentityService::new(provider.clone(), profiles.clone())),
        account_service: Arc::new(AccountService::new(provider, policy)),
        role_service: Arc::new(RoleService::new(profiles, history)),
        catalog_service: Arc::new(CatalogService::new(products)),
    })
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
