//! User profiles and resolved role assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::{Role, RoleId};

/// A user profile row.
///
/// Created alongside user signup (by the external auth collaborator),
/// updated on each role change, never deleted while the account exists.
/// `role_id` is nullable: a profile with no role is healed to
/// [`RoleId::USER`] by the role-resolution endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    /// The user's id (shared with the auth service).
    pub id: Uuid,
    /// The user's email.
    pub email: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Assigned role, if any.
    pub role_id: Option<RoleId>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
}

/// A profile joined with its resolved role.
///
/// This is the shape returned by the role-resolution endpoint and
/// consumed by the client session state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// The user's id.
    pub user_id: Uuid,
    /// The user's email.
    pub email: String,
    /// Display name.
    pub full_name: Option<String>,
    /// The resolved role record.
    pub role: Role,
}

impl RoleAssignment {
    /// Check whether this assignment meets the given role floor.
    pub fn has_at_least(&self, floor: RoleId) -> bool {
        self.role.id.has_at_least(floor)
    }
}
