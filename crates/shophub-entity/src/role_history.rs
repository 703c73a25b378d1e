//! Append-only role change history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::RoleId;

/// One role mutation, recorded exactly once per successful change.
///
/// Rows are never updated or deleted. Two invariants hold for every row
/// created through the privileged API: `changed_by != user_id` (no
/// self-modification) and `new_role_id != SuperAdmin` (the top role is
/// only assignable out-of-band, directly against storage).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RoleChangeRecord {
    /// Record id.
    pub id: Uuid,
    /// The user whose role changed.
    pub user_id: Uuid,
    /// Role before the change, if one was assigned.
    pub old_role_id: Option<RoleId>,
    /// Role after the change.
    pub new_role_id: RoleId,
    /// The acting administrator.
    pub changed_by: Uuid,
    /// When the change happened.
    pub changed_at: DateTime<Utc>,
    /// Operator-supplied reason.
    pub reason: Option<String>,
}

/// Outcome of a successful role mutation, returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleChange {
    /// The user whose role changed.
    pub user_id: Uuid,
    /// Role before the change.
    pub old_role_id: Option<RoleId>,
    /// Role after the change.
    pub new_role_id: RoleId,
}
