//! Message Repository Implementation
//!
//! PostgreSQL implementation of the MessageRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::corrupt_row;
use crate::domain::{Message, MessageContent, MessageId, MessageRepository, UserId};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: String,
    user_id: String,
    content: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for Message {
    type Error = AppError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        Ok(Message {
            id: MessageId::new(row.id).map_err(|e| corrupt_row("messages", e))?,
            user_id: UserId::new(row.user_id).map_err(|e| corrupt_row("messages", e))?,
            content: MessageContent::new(row.content).map_err(|e| corrupt_row("messages", e))?,
            read: row.read,
            created_at: row.created_at,
        })
    }
}

/// PostgreSQL message repository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            "SELECT id, user_id, content, read, created_at FROM messages WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Message::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Message>, AppError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, user_id, content, read, created_at
            FROM messages
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Message::try_from).collect()
    }

    async fn save(&self, message: &Message) -> Result<Message, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (id, user_id, content, read, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET content = EXCLUDED.content,
                read = EXCLUDED.read
            RETURNING id, user_id, content, read, created_at
            "#,
        )
        .bind(message.id.as_str())
        .bind(message.user_id.as_str())
        .bind(message.content.as_str())
        .bind(message.read)
        .bind(message.created_at)
        .fetch_one(&self.pool)
        .await?;

        Message::try_from(row)
    }

    async fn delete(&self, id: &MessageId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Message {} not found", id)));
        }

        Ok(())
    }
}
