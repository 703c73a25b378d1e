//! Account self-service — password changes.

use std::sync::Arc;

use tracing::{info, warn};

use shophub_auth::AuthProvider;
use shophub_auth::password::PasswordPolicy;
use shophub_core::error::{AppError, ErrorKind};
use shophub_core::result::AppResult;

use crate::context::RequestContext;

/// Handles password changes for the authenticated user.
///
/// The flow is re-authenticate, validate, then update: the current
/// password is proven against the auth provider before the complexity
/// policy ever sees the new one, so a stolen session alone cannot
/// rotate the credential.
#[derive(Clone)]
pub struct AccountService {
    provider: Arc<dyn AuthProvider>,
    policy: PasswordPolicy,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(provider: Arc<dyn AuthProvider>, policy: PasswordPolicy) -> Self {
        Self { provider, policy }
    }

    /// Change the actor's password.
    ///
    /// Logs every attempt by email; passwords never reach the log.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        info!(email = %ctx.email, "password change requested");

        if let Err(e) = self.provider.sign_in(&ctx.email, current_password).await {
            warn!(email = %ctx.email, "password change rejected: re-authentication failed");
            if e.kind == ErrorKind::Authentication {
                return Err(AppError::authentication("Current password is incorrect"));
            }
            return Err(e);
        }

        self.policy.validate_not_same(current_password, new_password)?;
        self.policy.validate(new_password, &ctx.email)?;

        self.provider
            .update_password(ctx.user_id, new_password)
            .await?;

        info!(email = %ctx.email, "password changed");
        Ok(())
    }
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use uuid::Uuid;

    use shophub_auth::provider::{SignInSession, VerifiedIdentity};
    use shophub_entity::role::RoleId;

    struct FakeProvider {
        current_password: &'static str,
        updates: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AuthProvider for FakeProvider {
        async fn verify_token(&self, _token: &str) -> AppResult<VerifiedIdentity> {
            Err(AppError::authentication("Invalid token"))
        }

        async fn sign_in(&self, email: &str, password: &str) -> AppResult<SignInSession> {
            if password == self.current_password {
                Ok(SignInSession {
                    access_token: "access".to_string(),
                    refresh_token: Some("refresh".to_string()),
                    expires_in: Some(3600),
                    user: VerifiedIdentity {
                        id: Uuid::new_v4(),
                        email: email.to_string(),
                    },
                })
            } else {
                Err(AppError::authentication("Invalid email or password"))
            }
        }

        async fn sign_out(&self, _token: &str) -> AppResult<()> {
            Ok(())
        }

        async fn update_password(&self, _user_id: Uuid, new_password: &str) -> AppResult<()> {
            self.updates
                .lock()
                .unwrap()
                .push(new_password.to_string());
            Ok(())
        }
    }

    fn ctx() -> RequestContext {
        RequestContext {
            user_id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            role_id: RoleId::USER,
            role_name: "user".to_string(),
            ip_address: "10.0.0.1".to_string(),
            request_time: chrono::Utc::now(),
        }
    }

    fn service(current: &'static str) -> (AccountService, Arc<FakeProvider>) {
        let provider = Arc::new(FakeProvider {
            current_password: current,
            updates: Mutex::new(Vec::new()),
        });
        (
            AccountService::new(provider.clone(), PasswordPolicy::default()),
            provider,
        )
    }

    #[tokio::test]
    async fn test_change_password_happy_path() {
        let (svc, provider) = service("Old#Pass1x");
        svc.change_password(&ctx(), "Old#Pass1x", "New#Pass2y")
            .await
            .unwrap();
        assert_eq!(provider.updates.lock().unwrap().as_slice(), ["New#Pass2y"]);
    }

    #[tokio::test]
    async fn test_wrong_current_password_rejected_before_policy() {
        let (svc, provider) = service("Old#Pass1x");
        // The new password is weak, but re-authentication fails first.
        let err = svc
            .change_password(&ctx(), "wrong", "weak")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(provider.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_weak_new_password_rejected() {
        let (svc, provider) = service("Old#Pass1x");
        let err = svc
            .change_password(&ctx(), "Old#Pass1x", "weak")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(provider.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_same_password_rejected() {
        let (svc, provider) = service("Old#Pass1x");
        let err = svc
            .change_password(&ctx(), "Old#Pass1x", "Old#Pass1x")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(provider.updates.lock().unwrap().is_empty());
    }
}
