//! User self-service handlers.

use axum::{Extension, Json};
use axum::extract::State;
use validator::Validate;

use shophub_core::error::AppError;
use shophub_service::RequestContext;

use crate::error::ApiError;
use crate::dto::request::ChangePasswordRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::state::AppState;

/// PUT /api/users/me/password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .account_service
        .change_password(&ctx, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Password changed successfully".to_string(),
    })))
}
