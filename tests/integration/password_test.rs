//! The password change flow end to end.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{
    USER_PASSWORD, USER_TOKEN, body_json, error_code, json as json_req, send, test_router,
};

fn change_body(current: &str, new: &str) -> serde_json::Value {
    json!({ "current_password": current, "new_password": new })
}

#[tokio::test]
async fn test_change_password_succeeds() {
    let router = test_router();

    let response = send(
        &router,
        json_req(
            "PUT",
            "/api/users/me/password",
            Some(USER_TOKEN),
            change_body(USER_PASSWORD, "Tr!ck93-Horse"),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["message"], "Password changed successfully");
}

#[tokio::test]
async fn test_change_password_requires_credentials() {
    let router = test_router();

    let response = send(
        &router,
        json_req(
            "PUT",
            "/api/users/me/password",
            None,
            change_body(USER_PASSWORD, "Tr!ck93-Horse"),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_current_password_is_rejected() {
    let router = test_router();

    let response = send(
        &router,
        json_req(
            "PUT",
            "/api/users/me/password",
            Some(USER_TOKEN),
            change_body("not-my-password", "Tr!ck93-Horse"),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "AUTHENTICATION");
}

#[tokio::test]
async fn test_weak_new_password_is_rejected() {
    let router = test_router();

    let response = send(
        &router,
        json_req(
            "PUT",
            "/api/users/me/password",
            Some(USER_TOKEN),
            change_body(USER_PASSWORD, "short"),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "VALIDATION");
}

#[tokio::test]
async fn test_password_containing_email_local_part_is_rejected() {
    let router = test_router();

    let response = send(
        &router,
        json_req(
            "PUT",
            "/api/users/me/password",
            Some(USER_TOKEN),
            change_body(USER_PASSWORD, "Alice#2024ok"),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reusing_current_password_is_rejected() {
    let router = test_router();

    let response = send(
        &router,
        json_req(
            "PUT",
            "/api/users/me/password",
            Some(USER_TOKEN),
            change_body(USER_PASSWORD, USER_PASSWORD),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_fourth_change_attempt_is_throttled() {
    let router = test_router();

    for _ in 0..3 {
        let response = send(
            &router,
            json_req(
                "PUT",
                "/api/users/me/password",
                Some(USER_TOKEN),
                change_body("not-my-password", "Tr!ck93-Horse"),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = send(
        &router,
        json_req(
            "PUT",
            "/api/users/me/password",
            Some(USER_TOKEN),
            change_body(USER_PASSWORD, "Tr!ck93-Horse"),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}
