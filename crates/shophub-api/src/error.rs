//! Maps domain `AppError` to HTTP responses.
//!
//! Status codes are assigned here and nowhere else; the domain layers
//! deal only in [`ErrorKind`].

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use shophub_core::error::{AppError, ErrorKind};

/// Standard API error envelope: `{"error": {"code", "message"}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// The error payload.
    pub error: ApiErrorBody,
}

/// The error payload inside the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl ApiErrorResponse {
    /// Build an envelope from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

/// Local wrapper around [`AppError`] so the HTTP mapping can live in
/// this crate without violating the orphan rule. Handlers return
/// `Result<_, ApiError>`; `?` converts from `AppError` transparently.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::ExternalService => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Server-side failure detail stays in the logs; the client gets
        // a generic message.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(kind = %self.0.kind, error = %self.0, "internal server error");
            "Internal server error".to_string()
        } else {
            self.0.message.clone()
        };

        let body = ApiErrorResponse::new(self.0.kind.to_string(), message);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::authentication("x"), StatusCode::UNAUTHORIZED),
            (AppError::authorization("x"), StatusCode::FORBIDDEN),
            (AppError::not_found("x"), StatusCode::NOT_FOUND),
            (AppError::validation("x"), StatusCode::BAD_REQUEST),
            (AppError::rate_limited("x"), StatusCode::TOO_MANY_REQUESTS),
            (AppError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::database("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).into_response().status(), expected);
        }
    }
}
