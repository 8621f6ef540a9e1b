//! User Handlers

use axum::{
    extract::{Extension, Path, State},
    Json,
};

use crate::application::dto::request::UpdateProfileRequest;
use crate::application::dto::response::UserResponse;
use crate::application::services::{ProvisionUserDto, UpdateProfileDto};
use crate::domain::{UserId, UserName};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::ValidatedJson;
use crate::startup::AppState;

/// Get the caller, creating the user record on first request
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserResponse>, AppError> {
    let name: String = auth
        .display_name()
        .chars()
        .take(UserName::MAX_LENGTH)
        .collect();

    let identity = ProvisionUserDto {
        id: auth.user_id.clone(),
        name: UserName::new(name)?,
        email: auth.email.clone(),
    };

    let user = state.users.current_user(identity).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update the caller's profile
pub async fn update_current_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AppError> {

    let update = UpdateProfileDto {
        name: body.name.map(UserName::new).transpose()?,
    };

    let user = state.users.update_profile(&auth.user_id, update).await?;
    Ok(Json(UserResponse::from(user)))
}

/// List all known users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.users.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user_id = UserId::new(user_id)?;

    let user = state.users.get_user(&user_id).await?;
    Ok(Json(UserResponse::from(user)))
}
