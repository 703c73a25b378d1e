//! Request context carrying the verified actor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shophub_auth::AuthenticatedUser;
use shophub_entity::role::RoleId;

/// Context for the current authenticated request.
///
/// Built by the permission middleware after verification succeeds and
/// passed into service methods so that every operation knows *who* is
/// acting and from *where*.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The verified actor's id.
    pub user_id: Uuid,
    /// The actor's email.
    pub email: String,
    /// The actor's role at verification time.
    pub role_id: RoleId,
    /// The actor's role machine name.
    pub role_name: String,
    /// IP address of the request origin.
    pub ip_address: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Build a context from a verified user and the request origin.
    pub fn new(user: AuthenticatedUser, ip_address: String) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            role_id: user.role_id,
            role_name: user.role_name,
            ip_address,
            request_time: Utc::now(),
        }
    }

    /// Whether the actor's role meets the given floor.
    pub fn has_at_least(&self, floor: RoleId) -> bool {
        self.role_id.has_at_least(floor)
    }
}
