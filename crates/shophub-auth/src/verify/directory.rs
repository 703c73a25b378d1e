//! Profile/role lookup seam for the verifier.

use async_trait::async_trait;
use uuid::Uuid;

use shophub_core::result::AppResult;
use shophub_database::repositories::profile::ProfileRepository;
use shophub_entity::role::Role;

/// A profile with its role relation, as the verifier needs it.
#[derive(Debug, Clone)]
pub struct ProfileRecord {
    /// The user's id.
    pub id: Uuid,
    /// The user's email.
    pub email: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Resolved role row, if the profile carries one.
    pub role: Option<Role>,
}

/// Resolves a verified identity to its persisted role assignment.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Look up the profile and role for a user id.
    ///
    /// `Ok(None)` means no profile row exists; a profile with
    /// `role: None` means the profile carries no resolvable role.
    async fn find_profile(&self, user_id: Uuid) -> AppResult<Option<ProfileRecord>>;
}

#[async_trait]
impl RoleDirectory for ProfileRepository {
    async fn find_profile(&self, user_id: Uuid) -> AppResult<Option<ProfileRecord>> {
        let Some(profile) = self.find_by_id(user_id).await? else {
            return Ok(None);
        };

        let role = match profile.role_id {
            Some(role_id) => self.find_role(role_id).await?,
            None => None,
        };

        Ok(Some(ProfileRecord {
            id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            role,
        }))
    }
}
