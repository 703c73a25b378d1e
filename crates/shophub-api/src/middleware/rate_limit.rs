//! Per-route-class throttling middleware.
//!
//! Runs before the permission guard, so over-quota requests are
//! rejected without spending a verification round-trip, and failed
//! sign-ins consume quota whether or not the credentials were valid.

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use shophub_auth::ratelimit::{RateLimitDecision, RouteClass, throttle_key};
use shophub_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::{bearer_token, client_ip};
use crate::state::AppState;

const LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
const RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");
const RETRY_AFTER: HeaderName = HeaderName::from_static("retry-after");

/// Count this request against its route class and reject with 429 when
/// the quota is exhausted. Rate-limit headers are attached to every
/// response, admitted or not.
pub async fn throttle(
    state: AppState,
    class: RouteClass,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.rate_limit.enabled {
        return next.run(request).await;
    }

    let ip = client_ip(request.headers());
    let bearer = bearer_token(request.headers());
    let key = throttle_key(class, &ip, bearer.as_deref());

    let decision = state.rate_limiter.check(&key, class).await;

    if decision.limited {
        let mut response = ApiError::from(AppError::rate_limited(decision.message)).into_response();
        attach_headers(&mut response, &decision);
        if let Ok(value) = HeaderValue::from_str(&decision.retry_after_secs.to_string()) {
            response.headers_mut().insert(RETRY_AFTER, value);
        }
        return response;
    }

    let mut response = next.run(request).await;
    attach_headers(&mut response, &decision);
    response
}

fn attach_headers(response: &mut Response, decision: &RateLimitDecision) {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&decision.limit.to_string()) {
        headers.insert(LIMIT, value);
    }
    if let Ok(value) = HeaderValue::from_str(&decision.remaining.to_string()) {
        headers.insert(REMAINING, value);
    }
    if let Ok(value) = HeaderValue::from_str(&decision.reset_at.timestamp().to_string()) {
        headers.insert(RESET, value);
    }
}
