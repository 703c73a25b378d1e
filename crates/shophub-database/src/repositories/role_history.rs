//! Role change history read queries.
//!
//! Writes happen inside [`ProfileRepository::change_role`] so that the
//! history insert shares the mutation's transaction.
//!
//! [`ProfileRepository::change_role`]: super::profile::ProfileRepository::change_role

use sqlx::PgPool;
use uuid::Uuid;

use shophub_core::error::{AppError, ErrorKind};
use shophub_core::result::AppResult;
use shophub_entity::role_history::RoleChangeRecord;

/// History queries are capped at this many rows.
const HISTORY_LIMIT: i64 = 100;

/// Repository for the append-only role change history.
#[derive(Debug, Clone)]
pub struct RoleHistoryRepository {
    pool: PgPool,
}

impl RoleHistoryRepository {
    /// Create a new role history repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List role changes, newest first, optionally filtered to one user.
    pub async fn list(&self, user_id: Option<Uuid>) -> AppResult<Vec<RoleChangeRecord>> {
        let records = match user_id {
            Some(uid) => {
                sqlx::query_as::<_, RoleChangeRecord>(
                    "SELECT id, user_id, old_role_id, new_role_id, changed_by, changed_at, reason \
                     FROM user_role_history WHERE user_id = $1 \
                     ORDER BY changed_at DESC LIMIT $2",
                )
                .bind(uid)
                .bind(HISTORY_LIMIT)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, RoleChangeRecord>(
                    "SELECT id, user_id, old_role_id, new_role_id, changed_by, changed_at, reason \
                     FROM user_role_history ORDER BY changed_at DESC LIMIT $1",
                )
                .bind(HISTORY_LIMIT)
                .fetch_all(&self.pool)
                .await
            }
        };

        records.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list role history", e)
        })
    }
}
