//! Sign-in proxying and role resolution with default-role healing.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use shophub_auth::AuthProvider;
use shophub_auth::provider::{SignInSession, VerifiedIdentity};
use shophub_core::error::AppError;
use shophub_core::result::AppResult;
use shophub_database::repositories::profile::ProfileRepository;
use shophub_entity::profile::RoleAssignment;

/// Handles sign-in and the role-resolution endpoint the client session
/// machine fetches from.
#[derive(Clone)]
pub struct IdentityService {
    provider: Arc<dyn AuthProvider>,
    profiles: Arc<ProfileRepository>,
}

impl IdentityService {
    /// Creates a new identity service.
    pub fn new(provider: Arc<dyn AuthProvider>, profiles: Arc<ProfileRepository>) -> Self {
        Self { provider, profiles }
    }

    /// Sign a user in with email and password.
    ///
    /// A thin proxy: the rate limiter has already counted the attempt
    /// by the time this runs, so wrong credentials still consume quota.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<SignInSession> {
        match self.provider.sign_in(email, password).await {
            Ok(session) => {
                info!(email, "sign-in succeeded");
                Ok(session)
            }
            Err(e) => {
                warn!(email, "sign-in failed");
                Err(e)
            }
        }
    }

    /// Invalidate the session behind a bearer credential.
    pub async fn sign_out(&self, bearer: Option<&str>) -> AppResult<()> {
        let token = bearer.ok_or_else(|| AppError::authentication("Missing authorization"))?;
        self.provider.sign_out(token).await?;
        info!("sign-out completed");
        Ok(())
    }

    /// Authenticate a bearer credential without any role requirement.
    ///
    /// Role resolution must work for profiles whose role is still NULL,
    /// so this deliberately skips the role-floor verifier.
    pub async fn authenticate(&self, bearer: Option<&str>) -> AppResult<VerifiedIdentity> {
        let token = bearer.ok_or_else(|| AppError::authentication("Missing authorization"))?;
        self.provider.verify_token(token).await
    }

    /// Resolve a verified user's role assignment.
    ///
    /// Profiles created before role assignment existed carry a NULL
    /// `role_id`; those are healed to the default role here. The UPDATE
    /// only touches NULL rows, so a concurrent explicit assignment
    /// wins and the re-read below observes it.
    pub async fn resolve_role(&self, user_id: Uuid) -> AppResult<RoleAssignment> {
        let profile = self
            .profiles
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let role_id = match profile.role_id {
            Some(role_id) => role_id,
            None => {
                self.profiles.assign_default_role(user_id).await?;
                info!(user = %user_id, "healed profile with default role");
                let healed = self
                    .profiles
                    .find_by_id(user_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("User not found"))?;
                healed
                    .role_id
                    .ok_or_else(|| AppError::not_found("Role not found"))?
            }
        };

        let role = self
            .profiles
            .find_role(role_id)
            .await?
            .ok_or_else(|| AppError::not_found("Role not found"))?;

        Ok(RoleAssignment {
            user_id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            role,
        })
    }
}

impl std::fmt::Debug for IdentityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityService").finish()
    }
}
