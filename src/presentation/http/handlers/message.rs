//! Message Handlers

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::response::MessageResponse;
use crate::domain::MessageId;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// The caller's notifications, newest first
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<MessageResponse>>, AppError> {
    let messages = state.messages.list_messages(&auth.user_id).await?;
    Ok(Json(messages.into_iter().map(MessageResponse::from).collect()))
}

/// Mark a notification as read
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(message_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let message_id = MessageId::new(message_id)?;

    let message = state.messages.mark_read(&auth.user_id, &message_id).await?;
    Ok(Json(MessageResponse::from(message)))
}

/// Delete a notification
pub async fn delete_message(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(message_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let message_id = MessageId::new(message_id)?;

    state
        .messages
        .delete_message(&auth.user_id, &message_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
