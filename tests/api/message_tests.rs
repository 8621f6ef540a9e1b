//! Message API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{TestApp, TestPlayer};

/// A player with exactly one notification in their inbox
async fn notified_player(app: &TestApp) -> (TestPlayer, String) {
    let owner = app.player().await;
    let player = app.player().await;
    let group_id = app.group(&owner, "Pickup Basketball").await;
    app.add_player(&owner, &group_id, &player).await;

    let messages = app.wait_for_messages(&player, 1).await;
    let id = messages[0]["id"].as_str().unwrap().to_string();
    (player, id)
}

#[tokio::test]
async fn test_mark_read_and_delete() {
    let app = TestApp::new().await;
    let (player, message_id) = notified_player(&app).await;

    let read = app
        .post_auth(&format!("/api/v1/messages/{}/read", message_id), &player.token)
        .await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.body["read"], true);

    let deleted = app
        .delete_auth(&format!("/api/v1/messages/{}", message_id), &player.token)
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let inbox = app.get_auth("/api/v1/messages", &player.token).await;
    assert!(inbox.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cannot_touch_someone_elses_message() {
    let app = TestApp::new().await;
    let (_, message_id) = notified_player(&app).await;
    let snoop = app.player().await;

    let read = app
        .post_auth(&format!("/api/v1/messages/{}/read", message_id), &snoop.token)
        .await;
    let deleted = app
        .delete_auth(&format!("/api/v1/messages/{}", message_id), &snoop.token)
        .await;

    assert_eq!(read.status, StatusCode::BAD_REQUEST);
    assert_eq!(read.code(), 10002);
    assert_eq!(deleted.code(), 10002);
}

#[tokio::test]
async fn test_unknown_message() {
    let app = TestApp::new().await;
    let player = app.player().await;

    let response = app
        .post_auth("/api/v1/messages/does-not-exist/read", &player.token)
        .await;

    assert_eq!(response.code(), 10001);
}
