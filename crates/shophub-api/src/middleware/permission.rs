//! Permission guard middleware.
//!
//! Wraps the verifier so privileged route groups declare their role
//! floor once. On success the built [`RequestContext`] is inserted into
//! request extensions for handlers to consume.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use shophub_entity::role::RoleId;
use shophub_service::RequestContext;

use crate::error::ApiError;
use crate::extractors::{bearer_token, client_ip};
use crate::state::AppState;

/// Verify the caller against a role floor before running the handler.
///
/// `action` and `resource` label the audit event the verifier emits.
pub async fn require_role(
    state: AppState,
    floor: RoleId,
    action: &'static str,
    resource: &'static str,
    mut request: Request,
    next: Next,
) -> Response {
    let bearer = bearer_token(request.headers());
    let ip = client_ip(request.headers());

    match state
        .verifier
        .verify(bearer.as_deref(), floor, action, resource)
        .await
    {
        Ok(user) => {
            request.extensions_mut().insert(RequestContext::new(user, ip));
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
