//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shophub_entity::role::RoleId;

/// Standard success envelope: `{"data": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self { data }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Sign-in response: tokens plus the signed-in identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token, when the auth service issues one.
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds, when reported.
    pub expires_in: Option<u64>,
    /// The signed-in user.
    pub user: IdentityResponse,
}

/// Identity summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
}

/// Result of a role change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleChangeResponse {
    /// The affected user.
    pub user_id: Uuid,
    /// Role before the change, if one was assigned.
    pub old_role_id: Option<RoleId>,
    /// Role after the change.
    pub new_role_id: RoleId,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// When the check ran.
    pub checked_at: DateTime<Utc>,
}
