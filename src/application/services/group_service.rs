//! Group Service
//!
//! Handles group management and player lists.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::events::{
    DomainEvent, Event, EventRepository, GroupCreated, GroupDeleted, GroupRenamed,
    PlayerAddedToGroup, PlayerLeftMatch, PlayerRemovedFromGroup,
};
use crate::domain::{
    Group, GroupId, GroupName, GroupRepository, MatchRepository, MembershipError, UserId,
    UserRepository,
};
use crate::infrastructure::events::EventPublisher;
use crate::shared::error::AppError;

/// Group service trait
#[async_trait]
pub trait GroupService: Send + Sync {
    /// Create a new group owned by `owner_id`
    async fn create_group(&self, owner_id: &UserId, name: GroupName) -> Result<Group, GroupError>;

    /// Get a group the actor plays in
    async fn get_group(&self, actor_id: &UserId, group_id: &GroupId) -> Result<Group, GroupError>;

    /// Groups the actor plays in
    async fn list_groups_for(&self, actor_id: &UserId) -> Result<Vec<Group>, GroupError>;

    /// Rename a group (owner only)
    async fn rename_group(&self, actor_id: &UserId, group_id: &GroupId, name: GroupName) -> Result<Group, GroupError>;

    /// Delete a group and its matches (owner only)
    async fn delete_group(&self, actor_id: &UserId, group_id: &GroupId) -> Result<(), GroupError>;

    /// Add a known user to the group (owner only)
    async fn add_player(&self, actor_id: &UserId, group_id: &GroupId, user_id: UserId) -> Result<Group, GroupError>;

    /// Remove a player; owners remove anyone but themselves, players remove themselves
    async fn remove_player(&self, actor_id: &UserId, group_id: &GroupId, user_id: &UserId) -> Result<Group, GroupError>;

    /// Stored events of the group, oldest first
    async fn group_history(&self, actor_id: &UserId, group_id: &GroupId) -> Result<Vec<Event>, GroupError>;
}

/// Group service errors
#[derive(Debug, thiserror::Error)]
pub enum GroupError {
    #[error("Group not found")]
    NotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Only the group owner may do this")]
    NotOwner,

    #[error("Not a player of this group")]
    NotAPlayer,

    #[error(transparent)]
    Membership(#[from] MembershipError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<GroupError> for AppError {
    fn from(err: GroupError) -> Self {
        match err {
            GroupError::NotFound => AppError::NotFound("Group not found".into()),
            GroupError::UserNotFound => AppError::NotFound("User not found".into()),
            GroupError::NotOwner | GroupError::NotAPlayer => AppError::NotAuthorized(err.to_string()),
            GroupError::Membership(e) => AppError::Conflict(e.to_string()),
            GroupError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// GroupService implementation
pub struct GroupServiceImpl {
    group_repo: Arc<dyn GroupRepository>,
    user_repo: Arc<dyn UserRepository>,
    match_repo: Arc<dyn MatchRepository>,
    event_repo: Arc<dyn EventRepository>,
    publisher: EventPublisher,
}

impl GroupServiceImpl {
    pub fn new(
        group_repo: Arc<dyn GroupRepository>,
        user_repo: Arc<dyn UserRepository>,
        match_repo: Arc<dyn MatchRepository>,
        event_repo: Arc<dyn EventRepository>,
        publisher: EventPublisher,
    ) -> Self {
        Self {
            group_repo,
            user_repo,
            match_repo,
            event_repo,
            publisher,
        }
    }

    async fn find(&self, group_id: &GroupId) -> Result<Group, GroupError> {
        self.group_repo
            .find_by_id(group_id)
            .await
            .map_err(|e| GroupError::Internal(e.to_string()))?
            .ok_or(GroupError::NotFound)
    }

    async fn find_owned(&self, actor_id: &UserId, group_id: &GroupId) -> Result<Group, GroupError> {
        let group = self.find(group_id).await?;
        if !group.is_owner(actor_id) {
            return Err(GroupError::NotOwner);
        }
        Ok(group)
    }

    async fn save(&self, group: &Group) -> Result<Group, GroupError> {
        self.group_repo
            .save(group)
            .await
            .map_err(|e| GroupError::Internal(e.to_string()))
    }

    async fn publish(&self, event: DomainEvent) -> Result<(), GroupError> {
        self.publisher
            .publish(event)
            .await
            .map_err(|e| GroupError::Internal(e.to_string()))
    }

    /// Take a former player off every open match of the group.
    ///
    /// Cancelled matches keep their player list as a record.
    async fn withdraw_from_matches(&self, group_id: &GroupId, user_id: &UserId) -> Result<usize, GroupError> {
        let matches = self
            .match_repo
            .find_by_group(group_id)
            .await
            .map_err(|e| GroupError::Internal(e.to_string()))?;

        let mut withdrawn = 0;
        for mut game in matches
            .into_iter()
            .filter(|m| !m.is_cancelled() && m.has_player(user_id))
        {
            game.leave(user_id)?;
            self.match_repo
                .save(&game)
                .await
                .map_err(|e| GroupError::Internal(e.to_string()))?;

            self.publish(DomainEvent::PlayerLeftMatch(PlayerLeftMatch {
                match_id: game.id.clone(),
                group_id: group_id.clone(),
                user_id: user_id.clone(),
            }))
            .await?;
            withdrawn += 1;
        }
        Ok(withdrawn)
    }
}

#[async_trait]
impl GroupService for GroupServiceImpl {
    async fn create_group(&self, owner_id: &UserId, name: GroupName) -> Result<Group, GroupError> {
        let group = self.save(&Group::new(name, owner_id.clone())).await?;

        tracing::info!(group_id = %group.id, owner_id = %owner_id, "Group created");

        self.publish(DomainEvent::GroupCreated(GroupCreated {
            group_id: group.id.clone(),
            name: group.name.clone(),
            owner_id: owner_id.clone(),
        }))
        .await?;

        Ok(group)
    }

    async fn get_group(&self, actor_id: &UserId, group_id: &GroupId) -> Result<Group, GroupError> {
        let group = self.find(group_id).await?;
        if !group.has_player(actor_id) {
            return Err(GroupError::NotAPlayer);
        }
        Ok(group)
    }

    async fn list_groups_for(&self, actor_id: &UserId) -> Result<Vec<Group>, GroupError> {
        self.group_repo
            .find_by_player(actor_id)
            .await
            .map_err(|e| GroupError::Internal(e.to_string()))
    }

    async fn rename_group(&self, actor_id: &UserId, group_id: &GroupId, name: GroupName) -> Result<Group, GroupError> {
        let mut group = self.find_owned(actor_id, group_id).await?;
        group.rename(name);
        let group = self.save(&group).await?;

        self.publish(DomainEvent::GroupRenamed(GroupRenamed {
            group_id: group.id.clone(),
            name: group.name.clone(),
        }))
        .await?;

        Ok(group)
    }

    async fn delete_group(&self, actor_id: &UserId, group_id: &GroupId) -> Result<(), GroupError> {
        let group = self.find_owned(actor_id, group_id).await?;

        let removed_matches = self
            .match_repo
            .delete_by_group(group_id)
            .await
            .map_err(|e| GroupError::Internal(e.to_string()))?;

        self.group_repo
            .delete(group_id)
            .await
            .map_err(|e| GroupError::Internal(e.to_string()))?;

        tracing::info!(group_id = %group_id, removed_matches, "Group deleted");

        self.publish(DomainEvent::GroupDeleted(GroupDeleted {
            group_id: group.id,
            name: group.name,
            owner_id: group.owner_id,
            players: group.players,
        }))
        .await
    }

    async fn add_player(&self, actor_id: &UserId, group_id: &GroupId, user_id: UserId) -> Result<Group, GroupError> {
        let mut group = self.find_owned(actor_id, group_id).await?;

        self.user_repo
            .find_by_id(&user_id)
            .await
            .map_err(|e| GroupError::Internal(e.to_string()))?
            .ok_or(GroupError::UserNotFound)?;

        group.add_player(user_id.clone())?;
        let group = self.save(&group).await?;

        self.publish(DomainEvent::PlayerAddedToGroup(PlayerAddedToGroup {
            group_id: group.id.clone(),
            group_name: group.name.clone(),
            user_id,
            added_by: actor_id.clone(),
        }))
        .await?;

        Ok(group)
    }

    async fn remove_player(&self, actor_id: &UserId, group_id: &GroupId, user_id: &UserId) -> Result<Group, GroupError> {
        let mut group = self.find(group_id).await?;

        if !group.is_owner(actor_id) && actor_id != user_id {
            return Err(GroupError::NotOwner);
        }

        group.remove_player(user_id)?;
        let group = self.save(&group).await?;

        self.publish(DomainEvent::PlayerRemovedFromGroup(PlayerRemovedFromGroup {
            group_id: group.id.clone(),
            group_name: group.name.clone(),
            user_id: user_id.clone(),
            removed_by: actor_id.clone(),
        }))
        .await?;

        let withdrawn = self.withdraw_from_matches(&group.id, user_id).await?;
        if withdrawn > 0 {
            tracing::debug!(group_id = %group.id, user_id = %user_id, withdrawn, "Removed player withdrawn from matches");
        }

        Ok(group)
    }

    async fn group_history(&self, actor_id: &UserId, group_id: &GroupId) -> Result<Vec<Event>, GroupError> {
        self.get_group(actor_id, group_id).await?;

        self.event_repo
            .find_by_aggregate(group_id.as_str())
            .await
            .map_err(|e| GroupError::Internal(e.to_string()))
    }
}
