//! Group Repository Implementation
//!
//! PostgreSQL implementation of the GroupRepository trait. Player lists are
//! stored as a `TEXT[]` column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::corrupt_row;
use crate::domain::{Group, GroupId, GroupName, GroupRepository, UserId};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct GroupRow {
    id: String,
    name: String,
    owner_id: String,
    players: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<GroupRow> for Group {
    type Error = AppError;

    fn try_from(row: GroupRow) -> Result<Self, Self::Error> {
        let players = row
            .players
            .into_iter()
            .map(UserId::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| corrupt_row("groups", e))?;

        Ok(Group {
            id: GroupId::new(row.id).map_err(|e| corrupt_row("groups", e))?,
            name: GroupName::new(row.name).map_err(|e| corrupt_row("groups", e))?,
            owner_id: UserId::new(row.owner_id).map_err(|e| corrupt_row("groups", e))?,
            players,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL group repository
#[derive(Clone)]
pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, AppError> {
        let row = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT id, name, owner_id, players, created_at, updated_at
            FROM groups
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Group::try_from).transpose()
    }

    async fn find_by_player(&self, user_id: &UserId) -> Result<Vec<Group>, AppError> {
        let rows = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT id, name, owner_id, players, created_at, updated_at
            FROM groups
            WHERE $1 = ANY(players)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Group::try_from).collect()
    }

    async fn save(&self, group: &Group) -> Result<Group, AppError> {
        let players: Vec<String> = group.players.iter().map(|p| p.to_string()).collect();

        let row = sqlx::query_as::<_, GroupRow>(
            r#"
            INSERT INTO groups (id, name, owner_id, players, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                owner_id = EXCLUDED.owner_id,
                players = EXCLUDED.players,
                updated_at = EXCLUDED.updated_at
            RETURNING id, name, owner_id, players, created_at, updated_at
            "#,
        )
        .bind(group.id.as_str())
        .bind(group.name.as_str())
        .bind(group.owner_id.as_str())
        .bind(&players)
        .bind(group.created_at)
        .bind(group.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Group::try_from(row)
    }

    async fn delete(&self, id: &GroupId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Group {} not found", id)));
        }

        Ok(())
    }
}
