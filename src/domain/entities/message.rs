//! Notification message entity and repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{MessageContent, MessageId, UserId};
use crate::shared::error::AppError;

/// A notification addressed to a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,

    /// Recipient
    pub user_id: UserId,

    pub content: MessageContent,

    #[serde(default)]
    pub read: bool,

    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(user_id: UserId, content: MessageContent) -> Self {
        Self {
            id: MessageId::generate(),
            user_id,
            content,
            read: false,
            created_at: Utc::now(),
        }
    }

    pub fn is_for(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

/// Repository trait for Message data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, AppError>;

    /// All messages for a user, newest first.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Message>, AppError>;

    async fn save(&self, message: &Message) -> Result<Message, AppError>;

    async fn delete(&self, id: &MessageId) -> Result<(), AppError>;
}
