//! Route definitions for the Shophub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. Each
//! privileged group is wrapped by two route layers, ordered so the
//! throttle runs before the permission guard.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use shophub_auth::ratelimit::RouteClass;
use shophub_entity::role::RoleId;

use crate::handlers;
use crate::middleware::{permission, rate_limit};
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes(&state))
        .merge(user_routes(&state))
        .merge(product_routes(&state))
        .merge(admin_routes(&state))
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(
            crate::middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Sign-in and role resolution.
///
/// Both are credential-level routes: sign-in is public behind the
/// strictest throttle, and role resolution authenticates in-handler so
/// NULL-role profiles can still be healed.
fn auth_routes(state: &AppState) -> Router<AppState> {
    let signin_state = state.clone();
    let signin = Router::new()
        .route("/auth/signin", post(handlers::auth::signin))
        .route_layer(axum_middleware::from_fn(move |request, next| {
            let state = signin_state.clone();
            async move { rate_limit::throttle(state, RouteClass::Auth, request, next).await }
        }));

    let me_state = state.clone();
    let me = Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/signout", post(handlers::auth::signout))
        .route_layer(axum_middleware::from_fn(move |request, next| {
            let state = me_state.clone();
            async move { rate_limit::throttle(state, RouteClass::Default, request, next).await }
        }));

    signin.merge(me)
}

/// User self-service.
fn user_routes(state: &AppState) -> Router<AppState> {
    let guard_state = state.clone();
    let throttle_state = state.clone();

    Router::new()
        .route("/users/me/password", put(handlers::user::change_password))
        .route_layer(axum_middleware::from_fn(move |request, next| {
            let state = guard_state.clone();
            async move {
                permission::require_role(
                    state,
                    RoleId::USER,
                    "change_password",
                    "account",
                    request,
                    next,
                )
                .await
            }
        }))
        .route_layer(axum_middleware::from_fn(move |request, next| {
            let state = throttle_state.clone();
            async move { rate_limit::throttle(state, RouteClass::Password, request, next).await }
        }))
}

/// Product catalog management.
fn product_routes(state: &AppState) -> Router<AppState> {
    let guard_state = state.clone();
    let throttle_state = state.clone();

    Router::new()
        .route("/products", post(handlers::products::create_product))
        .route("/products/{id}", put(handlers::products::update_product))
        .route(
            "/products/{id}/stock",
            put(handlers::products::update_stock),
        )
        .route(
            "/products/{id}",
            delete(handlers::products::delete_product),
        )
        .route_layer(axum_middleware::from_fn(move |request, next| {
            let state = guard_state.clone();
            async move {
                permission::require_role(state, RoleId::ADMIN, "manage", "products", request, next)
                    .await
            }
        }))
        .route_layer(axum_middleware::from_fn(move |request, next| {
            let state = throttle_state.clone();
            async move { rate_limit::throttle(state, RouteClass::Products, request, next).await }
        }))
}

/// User and role administration.
fn admin_routes(state: &AppState) -> Router<AppState> {
    let guard_state = state.clone();
    let throttle_state = state.clone();

    Router::new()
        .route("/admin/users", get(handlers::admin::users::list_users))
        .route(
            "/admin/users/{id}/role",
            put(handlers::admin::users::set_role),
        )
        .route(
            "/admin/users/role-history",
            get(handlers::admin::users::role_history),
        )
        .route_layer(axum_middleware::from_fn(move |request, next| {
            let state = guard_state.clone();
            async move {
                permission::require_role(
                    state,
                    RoleId::SUPER_ADMIN,
                    "administer",
                    "users",
                    request,
                    next,
                )
                .await
            }
        }))
        .route_layer(axum_middleware::from_fn(move |request, next| {
            let state = throttle_state.clone();
            async move { rate_limit::throttle(state, RouteClass::SuperAdmin, request, next).await }
        }))
}

/// Health check.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
