//! Integration tests for category endpoints

mod common;

use axum::http::StatusCode;
use common::unique;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_category_requires_auth() {
    let app = common::TestApp::new().await;

    let (status, _) = app
        .post("/api/category/add", &json!({"name": "Food"}))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_category_lifecycle() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;
    let name = unique("groceries");

    let (status, body) = app
        .post_auth("/api/category/add", &json!({"name": name}), &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let created: serde_json::Value = serde_json::from_str(&body).unwrap();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], name.as_str());

    let (status, body) = app.get_auth("/api/category/all", &user.token).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&name));

    let renamed = unique("food");
    let (status, body) = app
        .put_auth(
            &format!("/api/category/{id}"),
            &json!({"name": renamed}),
            &user.token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&renamed));

    let (status, body) = app
        .get_auth(&format!("/api/category/{id}"), &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&renamed));

    let (status, body) = app
        .delete_auth(&format!("/api/category/{id}"), &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("true"));

    let (status, _) = app
        .get_auth(&format!("/api/category/{id}"), &user.token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_duplicate_category_name_conflicts() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;
    let name = unique("travel");

    let (status, _) = app
        .post_auth("/api/category/add", &json!({"name": name}), &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post_auth("/api/category/add", &json!({"name": name}), &user.token)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_blank_category_name_rejected() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, _) = app
        .post_auth("/api/category/add", &json!({"name": "   "}), &user.token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_missing_category_returns_404() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, _) = app.get_auth("/api/category/999999", &user.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .put_auth("/api/category/999999", &json!({"name": unique("x")}), &user.token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete_auth("/api/category/999999", &user.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
