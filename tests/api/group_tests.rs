//! Group API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_create_group_makes_owner_first_player() {
    let app = TestApp::new().await;
    let owner = app.player().await;

    let response = app
        .post_json_auth("/api/v1/groups", json!({ "name": "Tuesday Futsal" }), &owner.token)
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["owner_id"], owner.id.as_str());
    assert_eq!(response.body["players"], json!([owner.id]));

    let listed = app.get_auth("/api/v1/groups", &owner.token).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_group_name_too_short() {
    let app = TestApp::new().await;
    let owner = app.player().await;

    let response = app
        .post_json_auth("/api/v1/groups", json!({ "name": "ab" }), &owner.token)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), 10005);
}

#[tokio::test]
async fn test_non_owner_cannot_manage_group() {
    let app = TestApp::new().await;
    let owner = app.player().await;
    let player = app.player().await;
    let outsider = app.player().await;
    let group_id = app.group(&owner, "Tuesday Futsal").await;
    app.add_player(&owner, &group_id, &player).await;

    let uri = format!("/api/v1/groups/{}", group_id);
    let rename = app
        .patch_json_auth(&uri, json!({ "name": "Hijacked" }), &player.token)
        .await;
    let delete = app.delete_auth(&uri, &player.token).await;
    let add = app
        .post_json_auth(
            &format!("{}/players", uri),
            json!({ "user_id": outsider.id }),
            &player.token,
        )
        .await;

    for response in [rename, delete, add] {
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.code(), 10002);
    }
}

#[tokio::test]
async fn test_non_player_cannot_read_group() {
    let app = TestApp::new().await;
    let owner = app.player().await;
    let outsider = app.player().await;
    let group_id = app.group(&owner, "Tuesday Futsal").await;

    let response = app
        .get_auth(&format!("/api/v1/groups/{}", group_id), &outsider.token)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), 10002);
}

#[tokio::test]
async fn test_added_player_is_notified() {
    let app = TestApp::new().await;
    let owner = app.player().await;
    let player = app.player().await;
    let group_id = app.group(&owner, "Tuesday Futsal").await;

    app.add_player(&owner, &group_id, &player).await;

    let messages = app.wait_for_messages(&player, 1).await;
    assert_eq!(messages.len(), 1);
    assert!(messages[0]["content"]
        .as_str()
        .unwrap()
        .contains("Tuesday Futsal"));
    assert_eq!(messages[0]["read"], false);

    assert!(app.settled_messages(&owner).await.is_empty());
}

#[tokio::test]
async fn test_adding_unknown_or_duplicate_player() {
    let app = TestApp::new().await;
    let owner = app.player().await;
    let player = app.player().await;
    let group_id = app.group(&owner, "Tuesday Futsal").await;
    app.add_player(&owner, &group_id, &player).await;
    let uri = format!("/api/v1/groups/{}/players", group_id);

    let unknown = app
        .post_json_auth(&uri, json!({ "user_id": "ghost" }), &owner.token)
        .await;
    let duplicate = app
        .post_json_auth(&uri, json!({ "user_id": player.id }), &owner.token)
        .await;

    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown.code(), 10001);
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.code(), 10004);
}

#[tokio::test]
async fn test_player_leaves_but_owner_cannot() {
    let app = TestApp::new().await;
    let owner = app.player().await;
    let player = app.player().await;
    let group_id = app.group(&owner, "Tuesday Futsal").await;
    app.add_player(&owner, &group_id, &player).await;

    let left = app
        .delete_auth(
            &format!("/api/v1/groups/{}/players/{}", group_id, player.id),
            &player.token,
        )
        .await;
    assert_eq!(left.status, StatusCode::OK);
    assert_eq!(left.body["players"], json!([owner.id]));

    // added + removed
    let messages = app.wait_for_messages(&player, 2).await;
    assert!(messages
        .iter()
        .any(|m| m["content"].as_str().unwrap().contains("removed from the group Tuesday Futsal")));

    let owner_leaves = app
        .delete_auth(
            &format!("/api/v1/groups/{}/players/{}", group_id, owner.id),
            &owner.token,
        )
        .await;
    assert_eq!(owner_leaves.status, StatusCode::BAD_REQUEST);
    assert_eq!(owner_leaves.code(), 10004);
}

#[tokio::test]
async fn test_deleted_group_notifies_former_players() {
    let app = TestApp::new().await;
    let owner = app.player().await;
    let player = app.player().await;
    let group_id = app.group(&owner, "Tuesday Futsal").await;
    app.add_player(&owner, &group_id, &player).await;
    app.wait_for_messages(&player, 1).await;

    let deleted = app
        .delete_auth(&format!("/api/v1/groups/{}", group_id), &owner.token)
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let messages = app.wait_for_messages(&player, 2).await;
    assert!(messages
        .iter()
        .any(|m| m["content"].as_str().unwrap().contains("was deleted")));

    let gone = app
        .get_auth(&format!("/api/v1/groups/{}", group_id), &owner.token)
        .await;
    assert_eq!(gone.code(), 10001);
}

#[tokio::test]
async fn test_group_history_lists_events_in_order() {
    let app = TestApp::new().await;
    let owner = app.player().await;
    let player = app.player().await;
    let group_id = app.group(&owner, "Tuesday Futsal").await;
    app.add_player(&owner, &group_id, &player).await;
    app.patch_json_auth(
        &format!("/api/v1/groups/{}", group_id),
        json!({ "name": "Thursday Futsal" }),
        &owner.token,
    )
    .await;

    let response = app
        .get_auth(&format!("/api/v1/groups/{}/events", group_id), &player.token)
        .await;

    let types: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["event_type"].as_str().unwrap())
        .collect();
    assert_eq!(
        types,
        vec!["GROUP_CREATED_V1", "PLAYER_ADDED_TO_GROUP_V1", "GROUP_RENAMED_V1"]
    );
}

#[tokio::test]
async fn test_group_body_without_name_is_bad_request() {
    let app = TestApp::new().await;
    let owner = app.player().await;

    let response = app
        .post_json_auth("/api/v1/groups", json!({}), &owner.token)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), 10005);
    assert!(response.body["message"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_padded_group_name_is_trimmed() {
    let app = TestApp::new().await;
    let owner = app.player().await;
    let name = "a".repeat(49);

    let response = app
        .post_json_auth(
            "/api/v1/groups",
            json!({ "name": format!("  {}  ", name) }),
            &owner.token,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["name"], name.as_str());
}
