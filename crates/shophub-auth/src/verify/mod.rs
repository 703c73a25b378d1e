//! Request-time permission verification.

mod audit;
mod directory;
mod verifier;

pub use audit::log_access;
pub use directory::{ProfileRecord, RoleDirectory};
pub use verifier::PermissionVerifier;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shophub_entity::role::RoleId;

/// Minimal authenticated-identity record handed to privileged handlers
/// after a successful verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// The user's id.
    pub id: Uuid,
    /// The user's email.
    pub email: String,
    /// Resolved role id.
    pub role_id: RoleId,
    /// Resolved role machine name.
    pub role_name: String,
}
