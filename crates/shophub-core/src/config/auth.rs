//! Hosted auth service configuration.

use serde::{Deserialize, Serialize};

/// Settings for the external authentication service.
///
/// Shophub never stores credentials or issues tokens itself; it verifies
/// bearer tokens and performs password operations against this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthServiceConfig {
    /// Base URL of the auth service (e.g. `https://project.example.co`).
    pub base_url: String,
    /// Public (anonymous) API key, used for credential re-verification.
    pub anon_key: String,
    /// Privileged service key, used for admin password updates.
    pub service_role_key: String,
    /// Timeout applied to every auth service request, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Minimum password length enforced by the local complexity policy.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum password length enforced by the local complexity policy.
    #[serde(default = "default_password_max")]
    pub password_max_length: usize,
}

fn default_request_timeout() -> u64 {
    10
}

fn default_password_min() -> usize {
    8
}

fn default_password_max() -> usize {
    128
}
