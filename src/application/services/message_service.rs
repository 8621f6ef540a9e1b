//! Message Service
//!
//! Notification inbox of a user.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::events::{DomainEvent, MessageSent};
use crate::domain::{Message, MessageContent, MessageId, MessageRepository, UserId};
use crate::infrastructure::events::EventPublisher;
use crate::shared::error::AppError;

/// Message service trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageService: Send + Sync {
    /// Messages addressed to the actor, newest first
    async fn list_messages(&self, actor_id: &UserId) -> Result<Vec<Message>, MessageError>;

    async fn mark_read(&self, actor_id: &UserId, message_id: &MessageId) -> Result<Message, MessageError>;

    async fn delete_message(&self, actor_id: &UserId, message_id: &MessageId) -> Result<(), MessageError>;

    /// Store a notification for a user and announce it
    async fn send_notification(&self, user_id: UserId, content: MessageContent) -> Result<Message, MessageError>;
}

/// Message service errors
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("Message not found")]
    NotFound,

    #[error("Message belongs to another user")]
    NotRecipient,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<MessageError> for AppError {
    fn from(err: MessageError) -> Self {
        match err {
            MessageError::NotFound => AppError::NotFound("Message not found".into()),
            MessageError::NotRecipient => AppError::NotAuthorized(err.to_string()),
            MessageError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// MessageService implementation
pub struct MessageServiceImpl {
    message_repo: Arc<dyn MessageRepository>,
    publisher: EventPublisher,
}

impl MessageServiceImpl {
    pub fn new(message_repo: Arc<dyn MessageRepository>, publisher: EventPublisher) -> Self {
        Self {
            message_repo,
            publisher,
        }
    }

    async fn owned(&self, actor_id: &UserId, message_id: &MessageId) -> Result<Message, MessageError> {
        let message = self
            .message_repo
            .find_by_id(message_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?
            .ok_or(MessageError::NotFound)?;

        if !message.is_for(actor_id) {
            return Err(MessageError::NotRecipient);
        }
        Ok(message)
    }
}

#[async_trait]
impl MessageService for MessageServiceImpl {
    async fn list_messages(&self, actor_id: &UserId) -> Result<Vec<Message>, MessageError> {
        self.message_repo
            .find_by_user(actor_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))
    }

    async fn mark_read(&self, actor_id: &UserId, message_id: &MessageId) -> Result<Message, MessageError> {
        let mut message = self.owned(actor_id, message_id).await?;
        if message.read {
            return Ok(message);
        }

        message.mark_read();
        self.message_repo
            .save(&message)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))
    }

    async fn delete_message(&self, actor_id: &UserId, message_id: &MessageId) -> Result<(), MessageError> {
        self.owned(actor_id, message_id).await?;

        self.message_repo
            .delete(message_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))
    }

    async fn send_notification(&self, user_id: UserId, content: MessageContent) -> Result<Message, MessageError> {
        let message = Message::new(user_id, content);
        let saved = self
            .message_repo
            .save(&message)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?;

        self.publisher
            .publish(DomainEvent::MessageSent(MessageSent {
                message_id: saved.id.clone(),
                user_id: saved.user_id.clone(),
            }))
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?;

        Ok(saved)
    }
}
