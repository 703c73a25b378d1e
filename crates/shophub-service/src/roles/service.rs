//! Role administration — listing users, changing roles, reading history.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use shophub_core::error::AppError;
use shophub_core::result::AppResult;
use shophub_database::repositories::profile::{ProfileRepository, ProfileWithRole};
use shophub_database::repositories::role_history::RoleHistoryRepository;
use shophub_entity::role::RoleId;
use shophub_entity::role_history::{RoleChange, RoleChangeRecord};

use crate::context::RequestContext;

/// Handles user listing and role mutation for administrators.
#[derive(Debug, Clone)]
pub struct RoleService {
    profiles: Arc<ProfileRepository>,
    history: Arc<RoleHistoryRepository>,
}

impl RoleService {
    /// Creates a new role service.
    pub fn new(profiles: Arc<ProfileRepository>, history: Arc<RoleHistoryRepository>) -> Self {
        Self { profiles, history }
    }

    /// List all users with their roles, newest first.
    pub async fn list_users(&self, ctx: &RequestContext) -> AppResult<Vec<ProfileWithRole>> {
        let users = self.profiles.list_with_roles().await?;
        info!(actor = %ctx.user_id, count = users.len(), "listed users");
        Ok(users)
    }

    /// Change a user's role, recording the change atomically.
    ///
    /// Two invariants hold regardless of the caller's own role:
    /// administrators cannot change their own role, and the super-admin
    /// role can never be granted through this operation.
    pub async fn set_role(
        &self,
        ctx: &RequestContext,
        target_user_id: Uuid,
        new_role_id: RoleId,
        reason: Option<&str>,
    ) -> AppResult<RoleChange> {
        ensure_not_self(ctx.user_id, target_user_id)?;
        ensure_assignable(new_role_id)?;

        let change = self
            .profiles
            .change_role(target_user_id, new_role_id, ctx.user_id, reason)
            .await?;

        info!(
            actor = %ctx.user_id,
            target = %target_user_id,
            old_role = ?change.old_role_id,
            new_role = %new_role_id,
            "role changed"
        );

        Ok(change)
    }

    /// Read the role change history, optionally for one user.
    pub async fn role_history(
        &self,
        ctx: &RequestContext,
        user_id: Option<Uuid>,
    ) -> AppResult<Vec<RoleChangeRecord>> {
        let records = self.history.list(user_id).await?;
        info!(actor = %ctx.user_id, count = records.len(), "read role history");
        Ok(records)
    }
}

/// Administrators may not change their own role.
fn ensure_not_self(actor: Uuid, target: Uuid) -> AppResult<()> {
    if actor == target {
        Err(AppError::authorization("Cannot change your own role"))
    } else {
        Ok(())
    }
}

/// Only known, non-super-admin roles can be assigned.
fn ensure_assignable(role_id: RoleId) -> AppResult<()> {
    match role_id {
        RoleId::USER | RoleId::ADMIN => Ok(()),
        RoleId::SUPER_ADMIN => Err(AppError::authorization(
            "The super admin role cannot be assigned",
        )),
        other => Err(AppError::validation(format!("Unknown role id: {other}"))),
    }
}
