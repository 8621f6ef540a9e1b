//! In-memory repositories.
//!
//! Process-local stores backed by `DashMap`, selected with
//! `storage.backend = "memory"`. Nothing survives a restart.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::domain::events::{Event, EventRepository};
use crate::domain::{
    Group, GroupId, GroupRepository, Match, MatchId, MatchRepository, Message, MessageId,
    MessageRepository, User, UserId, UserRepository,
};
use crate::shared::error::AppError;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<UserId, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AppError> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(users)
    }

    async fn save(&self, user: &User) -> Result<User, AppError> {
        self.users.insert(user.id.clone(), user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), AppError> {
        self.users
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}

#[derive(Default)]
pub struct InMemoryGroupRepository {
    groups: DashMap<GroupId, Group>,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, AppError> {
        Ok(self.groups.get(id).map(|g| g.value().clone()))
    }

    async fn find_by_player(&self, user_id: &UserId) -> Result<Vec<Group>, AppError> {
        let mut groups: Vec<Group> = self
            .groups
            .iter()
            .filter(|g| g.has_player(user_id))
            .map(|g| g.value().clone())
            .collect();
        groups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(groups)
    }

    async fn save(&self, group: &Group) -> Result<Group, AppError> {
        self.groups.insert(group.id.clone(), group.clone());
        Ok(group.clone())
    }

    async fn delete(&self, id: &GroupId) -> Result<(), AppError> {
        self.groups
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", id)))
    }
}

#[derive(Default)]
pub struct InMemoryMatchRepository {
    matches: DashMap<MatchId, Match>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn find_by_id(&self, id: &MatchId) -> Result<Option<Match>, AppError> {
        Ok(self.matches.get(id).map(|m| m.value().clone()))
    }

    async fn find_by_group(&self, group_id: &GroupId) -> Result<Vec<Match>, AppError> {
        let mut matches: Vec<Match> = self
            .matches
            .iter()
            .filter(|m| &m.group_id == group_id)
            .map(|m| m.value().clone())
            .collect();
        matches.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at));
        Ok(matches)
    }

    async fn save(&self, game: &Match) -> Result<Match, AppError> {
        self.matches.insert(game.id.clone(), game.clone());
        Ok(game.clone())
    }

    async fn delete_by_group(&self, group_id: &GroupId) -> Result<u64, AppError> {
        let mut removed = 0u64;
        self.matches.retain(|_, m| {
            let keep = &m.group_id != group_id;
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }
}

#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: DashMap<MessageId, Message>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, AppError> {
        Ok(self.messages.get(id).map(|m| m.value().clone()))
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Message>, AppError> {
        let mut messages: Vec<Message> = self
            .messages
            .iter()
            .filter(|m| m.is_for(user_id))
            .map(|m| m.value().clone())
            .collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(messages)
    }

    async fn save(&self, message: &Message) -> Result<Message, AppError> {
        self.messages.insert(message.id.clone(), message.clone());
        Ok(message.clone())
    }

    async fn delete(&self, id: &MessageId) -> Result<(), AppError> {
        self.messages
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Message {} not found", id)))
    }
}

/// Events kept in append order.
#[derive(Default)]
pub struct InMemoryEventRepository {
    events: RwLock<Vec<Event>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn append(&self, event: &Event) -> Result<(), AppError> {
        self.events.write().push(event.clone());
        Ok(())
    }

    async fn find_by_aggregate(&self, aggregate_id: &str) -> Result<Vec<Event>, AppError> {
        Ok(self
            .events
            .read()
            .iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .cloned()
            .collect())
    }
}
