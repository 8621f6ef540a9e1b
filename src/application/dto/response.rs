//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::{Deserialize, Serialize};

use crate::domain::{Event, Group, Match, Message, User};

/// User response
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            name: user.name.into(),
            email: user.email,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Group response
#[derive(Debug, Serialize, Deserialize)]
pub struct GroupResponse {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub players: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            id: group.id.into(),
            name: group.name.into(),
            owner_id: group.owner_id.into(),
            players: group.players.into_iter().map(String::from).collect(),
            created_at: group.created_at.to_rfc3339(),
            updated_at: group.updated_at.to_rfc3339(),
        }
    }
}

/// Match response
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResponse {
    pub id: String,
    pub group_id: String,
    pub scheduled_at: String,
    pub location: Option<String>,
    pub players: Vec<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Match> for MatchResponse {
    fn from(game: Match) -> Self {
        Self {
            id: game.id.into(),
            group_id: game.group_id.into(),
            scheduled_at: game.scheduled_at.to_rfc3339(),
            location: game.location.map(String::from),
            players: game.players.into_iter().map(String::from).collect(),
            status: game.status.as_str().to_string(),
            created_at: game.created_at.to_rfc3339(),
            updated_at: game.updated_at.to_rfc3339(),
        }
    }
}

/// Notification message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub read: bool,
    pub created_at: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id.into(),
            user_id: message.user_id.into(),
            content: message.content.into(),
            read: message.read,
            created_at: message.created_at.to_rfc3339(),
        }
    }
}

/// Stored event envelope, as shown in a group's history
#[derive(Debug, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: String,
    pub event_type: String,
    pub aggregate_id: String,
    pub payload: serde_json::Value,
    pub occurred_at: String,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id.into(),
            event_type: event.event_type.as_str().to_string(),
            aggregate_id: event.aggregate_id,
            payload: event.payload,
            occurred_at: event.occurred_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GroupName, UserId};

    #[test]
    fn test_group_response_flattens_ids() {
        let group = Group::new(
            GroupName::new("Sunday League").unwrap(),
            UserId::new("owner").unwrap(),
        );
        let id = group.id.as_str().to_string();

        let response = GroupResponse::from(group);

        assert_eq!(response.id, id);
        assert_eq!(response.owner_id, "owner");
        assert_eq!(response.players, vec!["owner".to_string()]);
    }
}
