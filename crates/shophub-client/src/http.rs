//! reqwest gateways against the Shophub API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use shophub_core::error::{AppError, ErrorKind};
use shophub_core::result::AppResult;
use shophub_entity::profile::RoleAssignment;

use crate::controller::{AuthGateway, ClientSession, RoleGateway};
use crate::machine::Identity;

/// HTTP client for the Shophub API, implementing both gateway seams.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    access_token: String,
    user: IdentityBody,
}

#[derive(Debug, Deserialize)]
struct IdentityBody {
    id: uuid::Uuid,
    email: String,
}

impl ApiClient {
    /// Create a client for the API at `base_url`.
    pub fn new(base_url: &str, request_timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build API client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Map a non-success response to an `AppError` using the error
    /// envelope when the body carries one.
    async fn error_from(response: reqwest::Response) -> AppError {
        let status = response.status();
        let body: Option<ErrorEnvelope> = response.json().await.ok();
        let message = body
            .map(|b| format!("{}: {}", b.error.code, b.error.message))
            .unwrap_or_else(|| format!("API request failed with status {status}"));

        match status.as_u16() {
            401 => AppError::authentication(message),
            403 => AppError::authorization(message),
            404 => AppError::not_found(message),
            400 => AppError::validation(message),
            429 => AppError::rate_limited(message),
            _ => AppError::external_service(message),
        }
    }
}

#[async_trait]
impl AuthGateway for ApiClient {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<ClientSession> {
        let response = self
            .client
            .post(self.url("/api/auth/signin"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::ExternalService, "Sign-in failed", e))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let body: Envelope<SessionBody> = response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Malformed sign-in response", e)
        })?;

        Ok(ClientSession {
            access_token: body.data.access_token,
            user: Identity {
                id: body.data.user.id,
                email: body.data.user.email,
            },
        })
    }
}

#[async_trait]
impl RoleGateway for ApiClient {
    async fn fetch_role(&self, token: &str) -> AppResult<RoleAssignment> {
        let response = self
            .client
            .get(self.url("/api/auth/me"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Role lookup failed", e)
            })?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let body: Envelope<RoleAssignment> = response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Malformed role response", e)
        })?;

        Ok(body.data)
    }
}
