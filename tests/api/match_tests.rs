//! Match API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{days_from_now, TestApp, TestPlayer};

/// Owner, one extra player, and their group id
async fn squad(app: &TestApp) -> (TestPlayer, TestPlayer, String) {
    let owner = app.player().await;
    let player = app.player().await;
    let group_id = app.group(&owner, "Sunday League").await;
    app.add_player(&owner, &group_id, &player).await;
    app.wait_for_messages(&player, 1).await;
    (owner, player, group_id)
}

#[tokio::test]
async fn test_schedule_match_notifies_other_players() {
    let app = TestApp::new().await;
    let (owner, player, group_id) = squad(&app).await;

    let response = app
        .post_json_auth(
            &format!("/api/v1/groups/{}/matches", group_id),
            json!({ "scheduled_at": days_from_now(3), "location": "Riverside Pitch 2" }),
            &player.token,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["status"], "scheduled");
    assert_eq!(response.body["players"], json!([player.id]));
    assert_eq!(response.body["location"], "Riverside Pitch 2");

    let owner_inbox = app.wait_for_messages(&owner, 1).await;
    assert!(owner_inbox[0]["content"]
        .as_str()
        .unwrap()
        .contains("Sunday League"));

    // Creator only has the "added to group" notification
    assert_eq!(app.settled_messages(&player).await.len(), 1);
}

#[tokio::test]
async fn test_match_in_past_rejected() {
    let app = TestApp::new().await;
    let (owner, _, group_id) = squad(&app).await;

    let response = app
        .post_json_auth(
            &format!("/api/v1/groups/{}/matches", group_id),
            json!({ "scheduled_at": days_from_now(-1) }),
            &owner.token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), 10005);
}

#[tokio::test]
async fn test_join_and_leave_match() {
    let app = TestApp::new().await;
    let (owner, player, group_id) = squad(&app).await;
    let created = app
        .post_json_auth(
            &format!("/api/v1/groups/{}/matches", group_id),
            json!({ "scheduled_at": days_from_now(2) }),
            &owner.token,
        )
        .await;
    let uri = format!("/api/v1/matches/{}/players", created.body["id"].as_str().unwrap());

    let joined = app.post_auth(&uri, &player.token).await;
    assert_eq!(joined.body["players"], json!([owner.id, player.id]));

    let again = app.post_auth(&uri, &player.token).await;
    assert_eq!(again.code(), 10004);

    let left = app.delete_auth(&uri, &player.token).await;
    assert_eq!(left.body["players"], json!([owner.id]));

    let listed = app
        .get_auth(&format!("/api/v1/groups/{}/matches", group_id), &player.token)
        .await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_outsider_cannot_see_match() {
    let app = TestApp::new().await;
    let (owner, _, group_id) = squad(&app).await;
    let outsider = app.player().await;
    let created = app
        .post_json_auth(
            &format!("/api/v1/groups/{}/matches", group_id),
            json!({ "scheduled_at": days_from_now(2) }),
            &owner.token,
        )
        .await;

    let response = app
        .get_auth(
            &format!("/api/v1/matches/{}", created.body["id"].as_str().unwrap()),
            &outsider.token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), 10002);
}

#[tokio::test]
async fn test_only_owner_cancels_and_players_are_notified() {
    let app = TestApp::new().await;
    let (owner, player, group_id) = squad(&app).await;
    let created = app
        .post_json_auth(
            &format!("/api/v1/groups/{}/matches", group_id),
            json!({ "scheduled_at": days_from_now(2) }),
            &owner.token,
        )
        .await;
    let match_uri = format!("/api/v1/matches/{}", created.body["id"].as_str().unwrap());
    app.post_auth(&format!("{}/players", match_uri), &player.token).await;
    // added to group + match scheduled
    app.wait_for_messages(&player, 2).await;

    let refused = app.delete_auth(&match_uri, &player.token).await;
    assert_eq!(refused.code(), 10002);

    let cancelled = app.delete_auth(&match_uri, &owner.token).await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.body["status"], "cancelled");

    let messages = app.wait_for_messages(&player, 3).await;
    assert!(messages
        .iter()
        .any(|m| m["content"].as_str().unwrap().contains("was cancelled")));
}

#[tokio::test]
async fn test_unparseable_date_is_bad_request() {
    let app = TestApp::new().await;
    let (owner, _, group_id) = squad(&app).await;

    let response = app
        .post_json_auth(
            &format!("/api/v1/groups/{}/matches", group_id),
            json!({ "scheduled_at": "next tuesday" }),
            &owner.token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), 10005);
}

#[tokio::test]
async fn test_removed_player_is_taken_off_matches() {
    let app = TestApp::new().await;
    let (owner, player, group_id) = squad(&app).await;
    let created = app
        .post_json_auth(
            &format!("/api/v1/groups/{}/matches", group_id),
            json!({ "scheduled_at": days_from_now(2) }),
            &owner.token,
        )
        .await;
    let match_uri = format!("/api/v1/matches/{}", created.body["id"].as_str().unwrap());
    app.post_auth(&format!("{}/players", match_uri), &player.token).await;

    let removed = app
        .delete_auth(
            &format!("/api/v1/groups/{}/players/{}", group_id, player.id),
            &owner.token,
        )
        .await;
    assert_eq!(removed.status, StatusCode::OK);

    let game = app.get_auth(&match_uri, &owner.token).await;
    assert_eq!(game.body["players"], json!([owner.id]));
}
