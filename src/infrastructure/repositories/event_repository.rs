//! Event Repository Implementation
//!
//! Append-only PostgreSQL store of event envelopes. Payloads live in a
//! JSONB column; the tag is kept as its literal string.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use super::corrupt_row;
use crate::domain::events::{Event, EventRepository, EventType};
use crate::domain::EventId;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: String,
    event_type: String,
    aggregate_id: String,
    payload: Value,
    occurred_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = AppError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Event {
            id: EventId::new(row.id).map_err(|e| corrupt_row("events", e))?,
            event_type: EventType::parse(&row.event_type)?,
            aggregate_id: row.aggregate_id,
            payload: row.payload,
            occurred_at: row.occurred_at,
        })
    }
}

/// PostgreSQL event store
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn append(&self, event: &Event) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO events (id, event_type, aggregate_id, payload, occurred_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(event.id.as_str())
        .bind(event.event_type.as_str())
        .bind(&event.aggregate_id)
        .bind(&event.payload)
        .bind(event.occurred_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_aggregate(&self, aggregate_id: &str) -> Result<Vec<Event>, AppError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, event_type, aggregate_id, payload, occurred_at
            FROM events
            WHERE aggregate_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(aggregate_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Event::try_from).collect()
    }
}
