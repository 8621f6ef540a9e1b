//! Match entity and repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MembershipError;
use crate::domain::value_objects::{GroupId, MatchId, MatchLocation, UserId};
use crate::shared::error::AppError;

/// Lifecycle state of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Cancelled,
}

impl MatchStatus {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "cancelled" => Self::Cancelled,
            _ => Self::Scheduled,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A game scheduled inside a group. Only group players can join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub group_id: GroupId,
    pub scheduled_at: DateTime<Utc>,
    pub location: Option<MatchLocation>,

    /// Players who confirmed attendance
    pub players: Vec<UserId>,

    #[serde(default)]
    pub status: MatchStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// Schedule a match; the creator is the first confirmed player.
    pub fn schedule(
        group_id: GroupId,
        scheduled_at: DateTime<Utc>,
        location: Option<MatchLocation>,
        creator: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: MatchId::generate(),
            group_id,
            scheduled_at,
            location,
            players: vec![creator],
            status: MatchStatus::Scheduled,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == MatchStatus::Cancelled
    }

    pub fn has_player(&self, user_id: &UserId) -> bool {
        self.players.contains(user_id)
    }

    pub fn join(&mut self, user_id: UserId) -> Result<(), MembershipError> {
        if self.is_cancelled() {
            return Err(MembershipError::MatchCancelled);
        }
        if self.has_player(&user_id) {
            return Err(MembershipError::AlreadyPlayer);
        }
        self.players.push(user_id);
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn leave(&mut self, user_id: &UserId) -> Result<(), MembershipError> {
        if self.is_cancelled() {
            return Err(MembershipError::MatchCancelled);
        }
        let before = self.players.len();
        self.players.retain(|p| p != user_id);
        if self.players.len() == before {
            return Err(MembershipError::NotAPlayer);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), MembershipError> {
        if self.is_cancelled() {
            return Err(MembershipError::MatchCancelled);
        }
        self.status = MatchStatus::Cancelled;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Repository trait for Match data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Find a match by id.
    async fn find_by_id(&self, id: &MatchId) -> Result<Option<Match>, AppError>;

    /// Find all matches of a group ordered by kick-off time.
    async fn find_by_group(&self, group_id: &GroupId) -> Result<Vec<Match>, AppError>;

    /// Insert or replace a match.
    async fn save(&self, game: &Match) -> Result<Match, AppError>;

    /// Delete every match of a group, returning how many were removed.
    async fn delete_by_group(&self, group_id: &GroupId) -> Result<u64, AppError>;
}
