//! Auth service seam.
//!
//! Shophub never implements credential storage or token issuance; the
//! hosted auth service does. Everything the rest of the system needs
//! from it goes through the [`AuthProvider`] trait so handlers and the
//! verifier can be tested against fakes.

mod http;

pub use http::HttpAuthProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shophub_core::result::AppResult;

/// Identity attached to a successfully verified bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    /// The user's id.
    pub id: Uuid,
    /// The user's email.
    pub email: String,
}

/// Result of a successful password sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInSession {
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// Refresh token, when the service issues one.
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds.
    pub expires_in: Option<u64>,
    /// The signed-in identity.
    pub user: VerifiedIdentity,
}

/// Operations delegated to the hosted auth service.
///
/// Implementations must return `ErrorKind::Authentication` for bad
/// credentials or invalid tokens and `ErrorKind::ExternalService` for
/// transport or upstream failures, so callers can map them faithfully.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verify a bearer token and return the identity it belongs to.
    async fn verify_token(&self, token: &str) -> AppResult<VerifiedIdentity>;

    /// Sign in with an email and password.
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<SignInSession>;

    /// Invalidate the session behind a bearer token.
    async fn sign_out(&self, token: &str) -> AppResult<()>;

    /// Set a new password for a user (privileged, service-key call).
    async fn update_password(&self, user_id: Uuid, new_password: &str) -> AppResult<()>;
}
