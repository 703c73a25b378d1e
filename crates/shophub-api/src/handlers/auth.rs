//! Sign-in and role-resolution handlers.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use validator::Validate;

use shophub_core::error::AppError;
use shophub_entity::profile::RoleAssignment;

use crate::error::ApiError;
use crate::dto::request::SignInRequest;
use crate::dto::response::{ApiResponse, IdentityResponse, MessageResponse, SessionResponse};
use crate::extractors::bearer_token;
use crate::state::AppState;

/// POST /api/auth/signin
///
/// Public, but behind the strictest throttle class: the limiter has
/// already counted this attempt before credentials are checked.
pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = state
        .identity_service
        .sign_in(&req.email, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(SessionResponse {
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        expires_in: session.expires_in,
        user: IdentityResponse {
            id: session.user.id,
            email: session.user.email,
        },
    })))
}

/// POST /api/auth/signout
pub async fn signout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let bearer = bearer_token(&headers);
    state.identity_service.sign_out(bearer.as_deref()).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Signed out".to_string(),
    })))
}

/// GET /api/auth/me
///
/// The role-resolution endpoint the client session machine fetches.
/// Requires only a valid credential, not a role: profiles with a NULL
/// role are healed to the default here.
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<RoleAssignment>>, ApiError> {
    let bearer = bearer_token(&headers);
    let identity = state
        .identity_service
        .authenticate(bearer.as_deref())
        .await?;

    let assignment = state.identity_service.resolve_role(identity.id).await?;
    Ok(Json(ApiResponse::ok(assignment)))
}
