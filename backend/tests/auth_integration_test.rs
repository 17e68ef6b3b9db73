//! Integration tests for authentication endpoints

mod common;

use axum::http::StatusCode;
use common::unique;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_success() {
    let app = common::TestApp::new().await;
    let username = unique("register");

    let (status, response) = app
        .post(
            "/api/auth/register",
            &json!({"username": username, "password": "secret123", "role": "ADMIN"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["username"], username.as_str());
    assert_eq!(response["role"], "ADMIN");
    assert!(response.get("password").is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_stores_hash_only() {
    let app = common::TestApp::new().await;
    let username = unique("hashed");

    app.post(
        "/api/auth/register",
        &json!({"username": username, "password": "secret123"}),
    )
    .await;

    let stored: (String, String) =
        sqlx::query_as("SELECT password_hash, role FROM users WHERE username = $1")
            .bind(&username)
            .fetch_one(&app.pool)
            .await
            .unwrap();

    assert_ne!(stored.0, "secret123");
    assert!(stored.0.starts_with("$2"));
    assert_eq!(stored.1, "USER");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_duplicate_username() {
    let app = common::TestApp::new().await;
    let username = unique("duplicate");

    let (status, _) = app
        .post(
            "/api/auth/register",
            &json!({"username": username, "password": "secret123"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post(
            "/api/auth/register",
            &json!({"username": username, "password": "another-pass"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("User already exists"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_concurrent_duplicate_registration_creates_one_user() {
    let app = common::TestApp::new().await;
    let username = unique("race");
    let body = json!({"username": username, "password": "secret123"});

    let (first, second) = tokio::join!(
        app.post("/api/auth/register", &body),
        app.post("/api/auth/register", &body),
    );

    let mut statuses = [first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_success_and_me() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, response) = app.get_auth("/api/auth/me", &user.token).await;

    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["username"], user.username.as_str());
    assert_eq!(response["role"], "USER");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_wrong_password() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, _) = app
        .post(
            "/api/auth/login",
            &json!({"username": user.username, "password": "WrongPassword1"}),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_unknown_user() {
    let app = common::TestApp::new().await;

    let (status, _) = app
        .post(
            "/api/auth/login",
            &json!({"username": unique("ghost"), "password": "secret123"}),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_token_of_deleted_user_is_rejected() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    sqlx::query("DELETE FROM users WHERE username = $1")
        .bind(&user.username)
        .execute(&app.pool)
        .await
        .unwrap();

    let (status, _) = app.get_auth("/api/auth/me", &user.token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
