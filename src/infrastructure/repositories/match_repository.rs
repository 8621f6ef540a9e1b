//! Match Repository Implementation
//!
//! PostgreSQL implementation of the MatchRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::corrupt_row;
use crate::domain::{
    GroupId, Match, MatchId, MatchLocation, MatchRepository, MatchStatus, UserId,
};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct MatchRow {
    id: String,
    group_id: String,
    scheduled_at: DateTime<Utc>,
    location: Option<String>,
    players: Vec<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MatchRow> for Match {
    type Error = AppError;

    fn try_from(row: MatchRow) -> Result<Self, Self::Error> {
        let players = row
            .players
            .into_iter()
            .map(UserId::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| corrupt_row("matches", e))?;

        let location = row
            .location
            .map(MatchLocation::new)
            .transpose()
            .map_err(|e| corrupt_row("matches", e))?;

        Ok(Match {
            id: MatchId::new(row.id).map_err(|e| corrupt_row("matches", e))?,
            group_id: GroupId::new(row.group_id).map_err(|e| corrupt_row("matches", e))?,
            scheduled_at: row.scheduled_at,
            location,
            players,
            status: MatchStatus::from_str(&row.status),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL match repository
#[derive(Clone)]
pub struct PgMatchRepository {
    pool: PgPool,
}

impl PgMatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchRepository for PgMatchRepository {
    async fn find_by_id(&self, id: &MatchId) -> Result<Option<Match>, AppError> {
        let row = sqlx::query_as::<_, MatchRow>(
            r#"
            SELECT id, group_id, scheduled_at, location, players, status, created_at, updated_at
            FROM matches
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Match::try_from).transpose()
    }

    async fn find_by_group(&self, group_id: &GroupId) -> Result<Vec<Match>, AppError> {
        let rows = sqlx::query_as::<_, MatchRow>(
            r#"
            SELECT id, group_id, scheduled_at, location, players, status, created_at, updated_at
            FROM matches
            WHERE group_id = $1
            ORDER BY scheduled_at ASC
            "#,
        )
        .bind(group_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Match::try_from).collect()
    }

    async fn save(&self, game: &Match) -> Result<Match, AppError> {
        let players: Vec<String> = game.players.iter().map(|p| p.to_string()).collect();

        let row = sqlx::query_as::<_, MatchRow>(
            r#"
            INSERT INTO matches
                (id, group_id, scheduled_at, location, players, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE
            SET scheduled_at = EXCLUDED.scheduled_at,
                location = EXCLUDED.location,
                players = EXCLUDED.players,
                status = EXCLUDED.status,
                updated_at = EXCLUDED.updated_at
            RETURNING id, group_id, scheduled_at, location, players, status, created_at, updated_at
            "#,
        )
        .bind(game.id.as_str())
        .bind(game.group_id.as_str())
        .bind(game.scheduled_at)
        .bind(game.location.as_ref().map(|l| l.as_str()))
        .bind(&players)
        .bind(game.status.as_str())
        .bind(game.created_at)
        .bind(game.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound(format!("Group {} not found", game.group_id))
            }
            _ => AppError::Database(e),
        })?;

        Match::try_from(row)
    }

    async fn delete_by_group(&self, group_id: &GroupId) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM matches WHERE group_id = $1")
            .bind(group_id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
