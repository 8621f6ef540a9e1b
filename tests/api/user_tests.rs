//! User API Tests

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{expired_token, token_for, TestApp};

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/v1/users/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), 10006);
}

#[tokio::test]
async fn test_bad_or_expired_token_is_unauthorized() {
    let app = TestApp::new().await;

    let garbage = app.get_auth("/api/v1/groups", "not-a-jwt").await;
    let expired = app.get_auth("/api/v1/groups", &expired_token("someone")).await;

    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
    assert_eq!(expired.body["message"], "Token expired");
}

#[tokio::test]
async fn test_current_user_is_provisioned_from_claims() {
    let app = TestApp::new().await;
    let token = token_for("kc-1234", "Alex Morgan");

    let first = app.get_auth("/api/v1/users/me", &token).await;
    let second = app.get_auth("/api/v1/users/me", &token).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["id"], "kc-1234");
    assert_eq!(first.body["name"], "Alex Morgan");
    assert_eq!(first.body["email"], "kc-1234@example.com");
    assert_eq!(first.body["created_at"], second.body["created_at"]);
}

#[tokio::test]
async fn test_update_profile_and_lookup() {
    let app = TestApp::new().await;
    let player = app.player().await;
    let other = app.player().await;

    let updated = app
        .patch_json_auth("/api/v1/users/me", json!({ "name": "Goalkeeper Sam" }), &player.token)
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["name"], "Goalkeeper Sam");

    let seen = app
        .get_auth(&format!("/api/v1/users/{}", player.id), &other.token)
        .await;
    assert_eq!(seen.body["name"], "Goalkeeper Sam");

    let all = app.get_auth("/api/v1/users", &other.token).await;
    assert_eq!(all.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_blank_profile_name_rejected() {
    let app = TestApp::new().await;
    let player = app.player().await;

    let response = app
        .patch_json_auth("/api/v1/users/me", json!({ "name": "   " }), &player.token)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), 10005);
}

#[tokio::test]
async fn test_unknown_user_is_bad_request() {
    let app = TestApp::new().await;
    let player = app.player().await;

    let response = app.get_auth("/api/v1/users/nobody", &player.token).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), 10001);
}
