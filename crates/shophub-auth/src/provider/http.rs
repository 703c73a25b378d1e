//! HTTP implementation of [`AuthProvider`] against the hosted auth API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use shophub_core::config::auth::AuthServiceConfig;
use shophub_core::error::AppError;
use shophub_core::result::AppResult;

use super::{AuthProvider, SignInSession, VerifiedIdentity};

/// Talks to the hosted auth service over its REST API.
///
/// Every request carries the configured timeout so a hung upstream can
/// never suspend a privileged operation indefinitely.
#[derive(Debug, Clone)]
pub struct HttpAuthProvider {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    service_role_key: String,
}

#[derive(Debug, Deserialize)]
struct UserBody {
    id: Uuid,
    email: String,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
    user: UserBody,
}

impl HttpAuthProvider {
    /// Create a provider from auth service configuration.
    pub fn new(config: &AuthServiceConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    shophub_core::error::ErrorKind::Configuration,
                    "Failed to build auth service client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            service_role_key: config.service_role_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn verify_token(&self, token: &str) -> AppResult<VerifiedIdentity> {
        let response = self
            .client
            .get(self.url("/auth/v1/user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    shophub_core::error::ErrorKind::ExternalService,
                    "Auth service unreachable",
                    e,
                )
            })?;

        match response.status() {
            StatusCode::OK => {
                let user: UserBody = response.json().await.map_err(|e| {
                    AppError::with_source(
                        shophub_core::error::ErrorKind::ExternalService,
                        "Malformed auth service response",
                        e,
                    )
                })?;
                Ok(VerifiedIdentity {
                    id: user.id,
                    email: user.email,
                })
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(AppError::authentication("Invalid token"))
            }
            status => Err(AppError::external_service(format!(
                "Auth service returned {status}"
            ))),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<SignInSession> {
        let response = self
            .client
            .post(self.url("/auth/v1/token?grant_type=password"))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    shophub_core::error::ErrorKind::ExternalService,
                    "Auth service unreachable",
                    e,
                )
            })?;

        match response.status() {
            StatusCode::OK => {
                let body: TokenBody = response.json().await.map_err(|e| {
                    AppError::with_source(
                        shophub_core::error::ErrorKind::ExternalService,
                        "Malformed auth service response",
                        e,
                    )
                })?;
                Ok(SignInSession {
                    access_token: body.access_token,
                    refresh_token: body.refresh_token,
                    expires_in: body.expires_in,
                    user: VerifiedIdentity {
                        id: body.user.id,
                        email: body.user.email,
                    },
                })
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(AppError::authentication("Invalid email or password"))
            }
            status => Err(AppError::external_service(format!(
                "Auth service returned {status}"
            ))),
        }
    }

    async fn sign_out(&self, token: &str) -> AppResult<()> {
        let response = self
            .client
            .post(self.url("/auth/v1/logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    shophub_core::error::ErrorKind::ExternalService,
                    "Auth service unreachable",
                    e,
                )
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::external_service(format!(
                "Auth service returned {}",
                response.status()
            )))
        }
    }

    async fn update_password(&self, user_id: Uuid, new_password: &str) -> AppResult<()> {
        let response = self
            .client
            .put(self.url(&format!("/auth/v1/admin/users/{user_id}")))
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .json(&serde_json::json!({ "password": new_password }))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    shophub_core::error::ErrorKind::ExternalService,
                    "Auth service unreachable",
                    e,
                )
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::external_service(format!(
                "Password update failed: auth service returned {}",
                response.status()
            )))
        }
    }
}
