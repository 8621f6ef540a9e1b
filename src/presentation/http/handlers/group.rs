//! Group Handlers

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{AddPlayerRequest, CreateGroupRequest, RenameGroupRequest};
use crate::application::dto::response::{EventResponse, GroupResponse};
use crate::domain::{GroupId, GroupName, UserId};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::ValidatedJson;
use crate::startup::AppState;

/// Create a new group owned by the caller
pub async fn create_group(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<CreateGroupRequest>,
) -> Result<(StatusCode, Json<GroupResponse>), AppError> {
    let name = GroupName::new(body.name)?;

    let group = state.groups.create_group(&auth.user_id, name).await?;
    Ok((StatusCode::CREATED, Json(GroupResponse::from(group))))
}

/// Groups the caller plays in
pub async fn list_groups(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<GroupResponse>>, AppError> {
    let groups = state.groups.list_groups_for(&auth.user_id).await?;
    Ok(Json(groups.into_iter().map(GroupResponse::from).collect()))
}

/// Get group by ID
pub async fn get_group(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(group_id): Path<String>,
) -> Result<Json<GroupResponse>, AppError> {
    let group_id = GroupId::new(group_id)?;

    let group = state.groups.get_group(&auth.user_id, &group_id).await?;
    Ok(Json(GroupResponse::from(group)))
}

/// Rename a group
pub async fn rename_group(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(group_id): Path<String>,
    ValidatedJson(body): ValidatedJson<RenameGroupRequest>,
) -> Result<Json<GroupResponse>, AppError> {
    let group_id = GroupId::new(group_id)?;
    let name = GroupName::new(body.name)?;

    let group = state
        .groups
        .rename_group(&auth.user_id, &group_id, name)
        .await?;
    Ok(Json(GroupResponse::from(group)))
}

/// Delete a group and its matches
pub async fn delete_group(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(group_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let group_id = GroupId::new(group_id)?;

    state.groups.delete_group(&auth.user_id, &group_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a player to a group
pub async fn add_player(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(group_id): Path<String>,
    ValidatedJson(body): ValidatedJson<AddPlayerRequest>,
) -> Result<Json<GroupResponse>, AppError> {
    let group_id = GroupId::new(group_id)?;
    let player_id = UserId::new(body.user_id)?;

    let group = state
        .groups
        .add_player(&auth.user_id, &group_id, player_id)
        .await?;
    Ok(Json(GroupResponse::from(group)))
}

/// Remove a player from a group (owner, or the player leaving)
pub async fn remove_player(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((group_id, user_id)): Path<(String, String)>,
) -> Result<Json<GroupResponse>, AppError> {
    let group_id = GroupId::new(group_id)?;
    let player_id = UserId::new(user_id)?;

    let group = state
        .groups
        .remove_player(&auth.user_id, &group_id, &player_id)
        .await?;
    Ok(Json(GroupResponse::from(group)))
}

/// Stored events of a group, oldest first
pub async fn group_events(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let group_id = GroupId::new(group_id)?;

    let events = state.groups.group_history(&auth.user_id, &group_id).await?;
    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}
