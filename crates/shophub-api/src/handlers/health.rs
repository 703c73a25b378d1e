//! Health check handler.

use axum::Json;
use axum::extract::State;

use shophub_database::connection::health_check;

use crate::error::ApiError;
use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    health_check(&state.db_pool).await?;

    Ok(Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checked_at: chrono::Utc::now(),
    })))
}
