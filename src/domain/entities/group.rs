//! Group entity and repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MembershipError;
use crate::domain::value_objects::{GroupId, GroupName, UserId};
use crate::shared::error::AppError;

/// A group of players, e.g. a team or a weekly five-a-side circle.
///
/// The owner is always contained in `players`, and `players` never holds
/// the same user twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,

    /// Group name (3-50 characters)
    pub name: GroupName,

    /// User who created the group
    pub owner_id: UserId,

    /// Player ids in join order
    pub players: Vec<UserId>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Create a group with the owner as its only player.
    pub fn new(name: GroupName, owner_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: GroupId::generate(),
            name,
            players: vec![owner_id.clone()],
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    pub fn has_player(&self, user_id: &UserId) -> bool {
        self.players.contains(user_id)
    }

    pub fn rename(&mut self, name: GroupName) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    pub fn add_player(&mut self, user_id: UserId) -> Result<(), MembershipError> {
        if self.has_player(&user_id) {
            return Err(MembershipError::AlreadyPlayer);
        }
        self.players.push(user_id);
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn remove_player(&mut self, user_id: &UserId) -> Result<(), MembershipError> {
        if self.is_owner(user_id) {
            return Err(MembershipError::OwnerCannotLeave);
        }
        let before = self.players.len();
        self.players.retain(|p| p != user_id);
        if self.players.len() == before {
            return Err(MembershipError::NotAPlayer);
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Repository trait for Group data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Find a group by id.
    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, AppError>;

    /// Find all groups the user plays in, newest first.
    async fn find_by_player(&self, user_id: &UserId) -> Result<Vec<Group>, AppError>;

    /// Insert or replace a group.
    async fn save(&self, group: &Group) -> Result<Group, AppError>;

    /// Delete a group by id.
    async fn delete(&self, id: &GroupId) -> Result<(), AppError>;
}
