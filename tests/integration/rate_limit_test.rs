//! Fixed-window throttling over the HTTP surface.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{USER_EMAIL, USER_PASSWORD, error_code, json as json_req, send, test_router};

fn signin_body(password: &str) -> serde_json::Value {
    json!({ "email": USER_EMAIL, "password": password })
}

#[tokio::test]
async fn test_sixth_signin_attempt_is_throttled() {
    let router = test_router();

    // Five wrong-password attempts all reach the credential check.
    for _ in 0..5 {
        let response = send(
            &router,
            json_req("POST", "/api/auth/signin", None, signin_body("wrong")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // The sixth is rejected by the limiter before credentials are
    // looked at, even though this one is correct.
    let response = send(
        &router,
        json_req("POST", "/api/auth/signin", None, signin_body(USER_PASSWORD)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .expect("Retry-After header");
    assert!(retry_after > 0 && retry_after <= 15 * 60);

    assert_eq!(error_code(response).await, "RATE_LIMITED");
}

#[tokio::test]
async fn test_rate_limit_headers_on_admitted_requests() {
    let router = test_router();

    let first = send(
        &router,
        json_req("POST", "/api/auth/signin", None, signin_body("wrong")),
    )
    .await;

    let header = |name: &str, response: &http::Response<axum::body::Body>| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    assert_eq!(header("x-ratelimit-limit", &first).as_deref(), Some("5"));
    assert_eq!(header("x-ratelimit-remaining", &first).as_deref(), Some("4"));
    assert!(header("x-ratelimit-reset", &first).is_some());

    let second = send(
        &router,
        json_req("POST", "/api/auth/signin", None, signin_body("wrong")),
    )
    .await;
    assert_eq!(
        header("x-ratelimit-remaining", &second).as_deref(),
        Some("3")
    );
}

#[tokio::test]
async fn test_successful_signin_consumes_quota() {
    let router = test_router();

    let response = send(
        &router,
        json_req("POST", "/api/auth/signin", None, signin_body(USER_PASSWORD)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok()),
        Some("4")
    );

    let body = crate::helpers::body_json(response).await;
    assert_eq!(body["data"]["user"]["email"], USER_EMAIL);
    assert!(body["data"]["access_token"].is_string());
}

#[tokio::test]
async fn test_route_classes_have_independent_windows() {
    let router = test_router();

    // Exhaust the auth class.
    for _ in 0..6 {
        send(
            &router,
            json_req("POST", "/api/auth/signin", None, signin_body("wrong")),
        )
        .await;
    }

    // The default class (role resolution) is still open.
    let response = send(&router, crate::helpers::get("/api/auth/me", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_ne!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}
