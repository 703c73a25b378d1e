//! Role-floor enforcement across the privileged routes.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{
    ADMIN_TOKEN, SUPER_ADMIN_TOKEN, USER_ID, USER_TOKEN, error_code, get, json as json_req, send,
    test_router,
};

#[tokio::test]
async fn test_admin_listing_requires_credentials() {
    let router = test_router();

    let response = send(&router, get("/api/admin/users", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "AUTHENTICATION");
}

#[tokio::test]
async fn test_admin_listing_rejects_garbage_token() {
    let router = test_router();

    let response = send(&router, get("/api/admin/users", Some("forged"))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_cannot_reach_admin_routes() {
    let router = test_router();

    let response = send(&router, get("/api/admin/users", Some(USER_TOKEN))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(error_code(response).await, "AUTHORIZATION");
}

#[tokio::test]
async fn test_admin_cannot_reach_super_admin_routes() {
    // Role changes require the top of the hierarchy, not just Admin.
    let router = test_router();

    let response = send(
        &router,
        json_req(
            "PUT",
            &format!("/api/admin/users/{USER_ID}/role"),
            Some(ADMIN_TOKEN),
            json!({ "role_id": 2 }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_user_cannot_manage_products() {
    let router = test_router();

    let response = send(
        &router,
        json_req(
            "POST",
            "/api/products",
            Some(USER_TOKEN),
            json!({
                "name": "Widget",
                "category_id": 1,
                "brand": "Acme",
                "price": 9.99,
                "stock": 5,
                "main_image": "https://cdn.example.com/w.jpg",
                "description": "A widget",
                "short_description": "Widget"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_super_admin_cannot_change_own_role() {
    use crate::helpers::SUPER_ADMIN_ID;

    let router = test_router();

    let response = send(
        &router,
        json_req(
            "PUT",
            &format!("/api/admin/users/{SUPER_ADMIN_ID}/role"),
            Some(SUPER_ADMIN_TOKEN),
            json!({ "role_id": 1 }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_super_admin_role_is_never_assignable() {
    let router = test_router();

    let response = send(
        &router,
        json_req(
            "PUT",
            &format!("/api/admin/users/{USER_ID}/role"),
            Some(SUPER_ADMIN_TOKEN),
            json!({ "role_id": 3 }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_role_resolution_requires_credentials() {
    let router = test_router();

    let response = send(&router, get("/api/auth/me", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
