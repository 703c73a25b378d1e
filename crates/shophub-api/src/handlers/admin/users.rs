//! User administration handlers.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use shophub_core::error::AppError;
use shophub_database::repositories::profile::ProfileWithRole;
use shophub_entity::role::RoleId;
use shophub_entity::role_history::RoleChangeRecord;
use shophub_service::RequestContext;

use crate::error::ApiError;
use crate::dto::request::SetRoleRequest;
use crate::dto::response::{ApiResponse, RoleChangeResponse};
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<ApiResponse<Vec<ProfileWithRole>>>, ApiError> {
    let users = state.role_service.list_users(&ctx).await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// PUT /api/admin/users/:id/role
pub async fn set_role(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<SetRoleRequest>,
) -> Result<Json<ApiResponse<RoleChangeResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let change = state
        .role_service
        .set_role(&ctx, user_id, RoleId(req.role_id), req.reason.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok(RoleChangeResponse {
        user_id: change.user_id,
        old_role_id: change.old_role_id,
        new_role_id: change.new_role_id,
    })))
}

/// Query parameters for the role history listing.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Restrict the listing to one user.
    pub user_id: Option<Uuid>,
}

/// GET /api/admin/users/role-history
pub async fn role_history(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<RoleChangeRecord>>>, ApiError> {
    let records = state.role_service.role_history(&ctx, query.user_id).await?;
    Ok(Json(ApiResponse::ok(records)))
}
