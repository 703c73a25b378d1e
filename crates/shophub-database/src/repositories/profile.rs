//! Profile and role-assignment repository.

use sqlx::PgPool;
use uuid::Uuid;

use shophub_core::error::{AppError, ErrorKind};
use shophub_core::result::AppResult;
use shophub_entity::role::{Role, RoleId};
use shophub_entity::role_history::RoleChange;
use shophub_entity::profile::Profile;

/// Repository for profiles and their role relation.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

/// A profile row joined with its role row, as returned by list queries.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct ProfileWithRole {
    /// The user's id.
    pub id: Uuid,
    /// The user's email.
    pub email: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Assigned role id, if any.
    pub role_id: Option<RoleId>,
    /// Role machine name, if a role is assigned.
    pub role_name: Option<String>,
    /// When the profile was created.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a profile by user id.
    pub async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>(
            "SELECT id, email, full_name, role_id, created_at FROM profiles WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find profile", e))
    }

    /// Find a role row by id.
    pub async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>(
            "SELECT id, name, description, created_at FROM roles WHERE id = $1",
        )
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find role", e))
    }

    /// Assign the default role to a profile that has none.
    ///
    /// Used by the role-resolution endpoint to heal profiles created
    /// before role assignment existed. Only touches rows where
    /// `role_id IS NULL` so a concurrent explicit assignment wins.
    pub async fn assign_default_role(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE profiles SET role_id = $1 WHERE id = $2 AND role_id IS NULL")
            .bind(RoleId::USER)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to assign default role", e)
            })?;
        Ok(())
    }

    /// List all profiles with their role names, newest first.
    pub async fn list_with_roles(&self) -> AppResult<Vec<ProfileWithRole>> {
        sqlx::query_as::<_, ProfileWithRole>(
            "SELECT p.id, p.email, p.full_name, p.role_id, r.name AS role_name, p.created_at \
             FROM profiles p LEFT JOIN roles r ON r.id = p.role_id \
             ORDER BY p.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list profiles", e))
    }

    /// Change a user's role and record the change in the same transaction.
    ///
    /// The history insert is atomic with the role mutation: either both
    /// commit or neither does. Returns the old and new role ids, or a
    /// not-found error when the target profile does not exist.
    pub async fn change_role(
        &self,
        user_id: Uuid,
        new_role_id: RoleId,
        changed_by: Uuid,
        reason: Option<&str>,
    ) -> AppResult<RoleChange> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let old_role_id: Option<Option<RoleId>> =
            sqlx::query_scalar("SELECT role_id FROM profiles WHERE id = $1 FOR UPDATE")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to read current role", e)
                })?;

        let Some(old_role_id) = old_role_id else {
            return Err(AppError::not_found("User not found"));
        };

        sqlx::query("UPDATE profiles SET role_id = $1 WHERE id = $2")
            .bind(new_role_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update role", e)
            })?;

        sqlx::query(
            "INSERT INTO user_role_history (user_id, old_role_id, new_role_id, changed_by, reason) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user_id)
        .bind(old_role_id)
        .bind(new_role_id)
        .bind(changed_by)
        .bind(reason)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record role change", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit role change", e)
        })?;

        Ok(RoleChange {
            user_id,
            old_role_id,
            new_role_id,
        })
    }
}
