//! The permission verifier — the authoritative security boundary.

use std::sync::Arc;

use shophub_core::error::AppError;
use shophub_core::result::AppResult;
use shophub_entity::role::RoleId;

use crate::provider::AuthProvider;

use super::audit::log_access;
use super::directory::RoleDirectory;
use super::AuthenticatedUser;

/// Authoritatively decides whether a caller may perform a privileged
/// operation.
///
/// Each verification walks a fixed sequence of terminal states:
/// missing credential (401), invalid credential (401), missing profile
/// (404), missing role (404), insufficient role (403), granted. All
/// required-role checks are minimum-role floors compared with `>=`
/// against the numeric hierarchy; there are no exact-set checks.
pub struct PermissionVerifier {
    provider: Arc<dyn AuthProvider>,
    directory: Arc<dyn RoleDirectory>,
}

impl PermissionVerifier {
    /// Create a verifier over an auth provider and role directory.
    pub fn new(provider: Arc<dyn AuthProvider>, directory: Arc<dyn RoleDirectory>) -> Self {
        Self {
            provider,
            directory,
        }
    }

    /// Verify a bearer credential against a role floor.
    ///
    /// Emits exactly one audit event, whatever the outcome. `action`
    /// and `resource` label that event.
    pub async fn verify(
        &self,
        bearer: Option<&str>,
        floor: RoleId,
        action: &str,
        resource: &str,
    ) -> AppResult<AuthenticatedUser> {
        let Some(token) = bearer else {
            log_access("unknown", action, resource, false);
            return Err(AppError::authentication("Missing authorization"));
        };

        let identity = match self.provider.verify_token(token).await {
            Ok(identity) => identity,
            Err(e) => {
                log_access("unknown", action, resource, false);
                // Upstream failures stay 5xx; only credential failures become 401.
                if e.kind == shophub_core::error::ErrorKind::Authentication {
                    return Err(AppError::authentication("Invalid token"));
                }
                return Err(e);
            }
        };

        let actor = identity.id.to_string();

        let profile = match self.directory.find_profile(identity.id).await {
            Ok(profile) => profile,
            Err(e) => {
                log_access(&actor, action, resource, false);
                return Err(e);
            }
        };

        let Some(profile) = profile else {
            log_access(&actor, action, resource, false);
            return Err(AppError::not_found("User not found"));
        };

        let Some(role) = profile.role else {
            log_access(&actor, action, resource, false);
            return Err(AppError::not_found("Role not found"));
        };

        if !role.id.has_at_least(floor) {
            log_access(&actor, action, resource, false);
            return Err(AppError::authorization(format!(
                "Insufficient permission: requires role {} or above",
                floor.name()
            )));
        }

        log_access(&actor, action, resource, true);

        Ok(AuthenticatedUser {
            id: profile.id,
            email: profile.email,
            role_id: role.id,
            role_name: role.name,
        })
    }
}

impl std::fmt::Debug for PermissionVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionVerifier").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use shophub_core::error::ErrorKind;
    use shophub_entity::role::Role;
    use uuid::Uuid;

    use crate::provider::{SignInSession, VerifiedIdentity};
    use crate::verify::ProfileRecord;

    struct FakeProvider {
        identity: Option<VerifiedIdentity>,
    }

    #[async_trait]
    impl AuthProvider for FakeProvider {
        async fn verify_token(&self, _token: &str) -> AppResult<VerifiedIdentity> {
            self.identity
                .clone()
                .ok_or_else(|| AppError::authentication("Invalid token"))
        }

        async fn sign_in(&self, _email: &str, _password: &str) -> AppResult<SignInSession> {
            Err(AppError::authentication("Invalid email or password"))
        }

        async fn sign_out(&self, _token: &str) -> AppResult<()> {
            Ok(())
        }

        async fn update_password(&self, _user_id: Uuid, _new_password: &str) -> AppResult<()> {
            Ok(())
        }
    }

    struct FakeDirectory {
        profile: Option<ProfileRecord>,
    }

    #[async_trait]
    impl RoleDirectory for FakeDirectory {
        async fn find_profile(&self, _user_id: Uuid) -> AppResult<Option<ProfileRecord>> {
            Ok(self.profile.clone())
        }
    }

    fn role(id: RoleId) -> Role {
        Role {
            id,
            name: id.name().to_string(),
            description: None,
            created_at: Utc::now(),
        }
    }

    fn verifier_with(
        identity: Option<VerifiedIdentity>,
        profile: Option<ProfileRecord>,
    ) -> PermissionVerifier {
        PermissionVerifier::new(
            Arc::new(FakeProvider { identity }),
            Arc::new(FakeDirectory { profile }),
        )
    }

    fn identity(id: Uuid) -> VerifiedIdentity {
        VerifiedIdentity {
            id,
            email: "user@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_credential() {
        let v = verifier_with(None, None);
        let err = v
            .verify(None, RoleId::USER, "list", "users")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_invalid_credential_is_authentication_not_authorization() {
        let v = verifier_with(None, None);
        let err = v
            .verify(Some("expired"), RoleId::USER, "list", "users")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_missing_profile() {
        let uid = Uuid::new_v4();
        let v = verifier_with(Some(identity(uid)), None);
        let err = v
            .verify(Some("token"), RoleId::USER, "list", "users")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_missing_role() {
        let uid = Uuid::new_v4();
        let profile = ProfileRecord {
            id: uid,
            email: "user@example.com".to_string(),
            full_name: None,
            role: None,
        };
        let v = verifier_with(Some(identity(uid)), Some(profile));
        let err = v
            .verify(Some("token"), RoleId::USER, "list", "users")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_insufficient_role() {
        let uid = Uuid::new_v4();
        let profile = ProfileRecord {
            id: uid,
            email: "user@example.com".to_string(),
            full_name: None,
            role: Some(role(RoleId::USER)),
        };
        let v = verifier_with(Some(identity(uid)), Some(profile));
        let err = v
            .verify(Some("token"), RoleId::SUPER_ADMIN, "set_role", "users")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_granted_at_floor_and_above() {
        let uid = Uuid::new_v4();
        for role_id in [RoleId::ADMIN, RoleId::SUPER_ADMIN] {
            let profile = ProfileRecord {
                id: uid,
                email: "admin@example.com".to_string(),
                full_name: None,
                role: Some(role(role_id)),
            };
            let v = verifier_with(Some(identity(uid)), Some(profile));
            let user = v
                .verify(Some("token"), RoleId::ADMIN, "manage", "products")
                .await
                .unwrap();
            assert_eq!(user.id, uid);
            assert_eq!(user.role_id, role_id);
        }
    }
}
