//! Match Handlers

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::CreateMatchRequest;
use crate::application::dto::response::MatchResponse;
use crate::application::services::CreateMatchDto;
use crate::domain::{GroupId, MatchId, MatchLocation};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::ValidatedJson;
use crate::startup::AppState;

/// Schedule a match in a group
pub async fn create_match(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(group_id): Path<String>,
    ValidatedJson(body): ValidatedJson<CreateMatchRequest>,
) -> Result<(StatusCode, Json<MatchResponse>), AppError> {
    let group_id = GroupId::new(group_id)?;

    // Blank location means none
    let location = body
        .location
        .filter(|l| !l.trim().is_empty())
        .map(MatchLocation::new)
        .transpose()?;

    let request = CreateMatchDto {
        scheduled_at: body.scheduled_at,
        location,
    };

    let game = state
        .matches
        .create_match(&auth.user_id, &group_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(MatchResponse::from(game))))
}

/// Matches of a group
pub async fn list_matches(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<MatchResponse>>, AppError> {
    let group_id = GroupId::new(group_id)?;

    let matches = state.matches.list_matches(&auth.user_id, &group_id).await?;
    Ok(Json(matches.into_iter().map(MatchResponse::from).collect()))
}

/// Get match by ID
pub async fn get_match(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchResponse>, AppError> {
    let match_id = MatchId::new(match_id)?;

    let game = state.matches.get_match(&auth.user_id, &match_id).await?;
    Ok(Json(MatchResponse::from(game)))
}

/// Cancel a match
pub async fn cancel_match(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchResponse>, AppError> {
    let match_id = MatchId::new(match_id)?;

    let game = state.matches.cancel_match(&auth.user_id, &match_id).await?;
    Ok(Json(MatchResponse::from(game)))
}

/// Join a match as the caller
pub async fn join_match(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchResponse>, AppError> {
    let match_id = MatchId::new(match_id)?;

    let game = state.matches.join_match(&auth.user_id, &match_id).await?;
    Ok(Json(MatchResponse::from(game)))
}

/// Leave a match as the caller
pub async fn leave_match(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchResponse>, AppError> {
    let match_id = MatchId::new(match_id)?;

    let game = state.matches.leave_match(&auth.user_id, &match_id).await?;
    Ok(Json(MatchResponse::from(game)))
}
