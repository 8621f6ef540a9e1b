//! # Domain Events
//!
//! Records of state changes published by the services and consumed by
//! listeners in other modules. For storage and transport every event is
//! mapped into the generic [`Event`] envelope, keyed by a versioned
//! [`EventType`] tag.

mod envelope;
mod payloads;

pub use envelope::{deserialize_event, serialize_event, Event, EventRepository};
pub use payloads::*;

#[cfg(test)]
pub use envelope::MockEventRepository;

use serde::{Deserialize, Serialize};

/// Versioned tag identifying the payload shape inside an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "USER_CREATED_V1")]
    UserCreatedV1,
    #[serde(rename = "USER_UPDATED_V1")]
    UserUpdatedV1,
    #[serde(rename = "GROUP_CREATED_V1")]
    GroupCreatedV1,
    #[serde(rename = "GROUP_RENAMED_V1")]
    GroupRenamedV1,
    #[serde(rename = "GROUP_DELETED_V1")]
    GroupDeletedV1,
    #[serde(rename = "PLAYER_ADDED_TO_GROUP_V1")]
    PlayerAddedToGroupV1,
    #[serde(rename = "PLAYER_REMOVED_FROM_GROUP_V1")]
    PlayerRemovedFromGroupV1,
    #[serde(rename = "MATCH_CREATED_V1")]
    MatchCreatedV1,
    #[serde(rename = "MATCH_CANCELLED_V1")]
    MatchCancelledV1,
    #[serde(rename = "PLAYER_JOINED_MATCH_V1")]
    PlayerJoinedMatchV1,
    #[serde(rename = "PLAYER_LEFT_MATCH_V1")]
    PlayerLeftMatchV1,
    #[serde(rename = "MESSAGE_SENT_V1")]
    MessageSentV1,
}

impl EventType {
    pub const ALL: [EventType; 12] = [
        EventType::UserCreatedV1,
        EventType::UserUpdatedV1,
        EventType::GroupCreatedV1,
        EventType::GroupRenamedV1,
        EventType::GroupDeletedV1,
        EventType::PlayerAddedToGroupV1,
        EventType::PlayerRemovedFromGroupV1,
        EventType::MatchCreatedV1,
        EventType::MatchCancelledV1,
        EventType::PlayerJoinedMatchV1,
        EventType::PlayerLeftMatchV1,
        EventType::MessageSentV1,
    ];

    /// The literal tag stored alongside the payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserCreatedV1 => "USER_CREATED_V1",
            Self::UserUpdatedV1 => "USER_UPDATED_V1",
            Self::GroupCreatedV1 => "GROUP_CREATED_V1",
            Self::GroupRenamedV1 => "GROUP_RENAMED_V1",
            Self::GroupDeletedV1 => "GROUP_DELETED_V1",
            Self::PlayerAddedToGroupV1 => "PLAYER_ADDED_TO_GROUP_V1",
            Self::PlayerRemovedFromGroupV1 => "PLAYER_REMOVED_FROM_GROUP_V1",
            Self::MatchCreatedV1 => "MATCH_CREATED_V1",
            Self::MatchCancelledV1 => "MATCH_CANCELLED_V1",
            Self::PlayerJoinedMatchV1 => "PLAYER_JOINED_MATCH_V1",
            Self::PlayerLeftMatchV1 => "PLAYER_LEFT_MATCH_V1",
            Self::MessageSentV1 => "MESSAGE_SENT_V1",
        }
    }

    pub fn parse(tag: &str) -> Result<Self, EventError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| EventError::UnknownType(tag.to_string()))
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state change in one of the modules.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    UserCreated(UserCreated),
    UserUpdated(UserUpdated),
    GroupCreated(GroupCreated),
    GroupRenamed(GroupRenamed),
    GroupDeleted(GroupDeleted),
    PlayerAddedToGroup(PlayerAddedToGroup),
    PlayerRemovedFromGroup(PlayerRemovedFromGroup),
    MatchCreated(MatchCreated),
    MatchCancelled(MatchCancelled),
    PlayerJoinedMatch(PlayerJoinedMatch),
    PlayerLeftMatch(PlayerLeftMatch),
    MessageSent(MessageSent),
}

impl DomainEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            Self::UserCreated(_) => EventType::UserCreatedV1,
            Self::UserUpdated(_) => EventType::UserUpdatedV1,
            Self::GroupCreated(_) => EventType::GroupCreatedV1,
            Self::GroupRenamed(_) => EventType::GroupRenamedV1,
            Self::GroupDeleted(_) => EventType::GroupDeletedV1,
            Self::PlayerAddedToGroup(_) => EventType::PlayerAddedToGroupV1,
            Self::PlayerRemovedFromGroup(_) => EventType::PlayerRemovedFromGroupV1,
            Self::MatchCreated(_) => EventType::MatchCreatedV1,
            Self::MatchCancelled(_) => EventType::MatchCancelledV1,
            Self::PlayerJoinedMatch(_) => EventType::PlayerJoinedMatchV1,
            Self::PlayerLeftMatch(_) => EventType::PlayerLeftMatchV1,
            Self::MessageSent(_) => EventType::MessageSentV1,
        }
    }

    /// Id of the entity whose history this event belongs to.
    ///
    /// Match events are filed under their group so a group's history
    /// includes its matches.
    pub fn aggregate_id(&self) -> &str {
        match self {
            Self::UserCreated(e) => e.user_id.as_str(),
            Self::UserUpdated(e) => e.user_id.as_str(),
            Self::GroupCreated(e) => e.group_id.as_str(),
            Self::GroupRenamed(e) => e.group_id.as_str(),
            Self::GroupDeleted(e) => e.group_id.as_str(),
            Self::PlayerAddedToGroup(e) => e.group_id.as_str(),
            Self::PlayerRemovedFromGroup(e) => e.group_id.as_str(),
            Self::MatchCreated(e) => e.group_id.as_str(),
            Self::MatchCancelled(e) => e.group_id.as_str(),
            Self::PlayerJoinedMatch(e) => e.group_id.as_str(),
            Self::PlayerLeftMatch(e) => e.group_id.as_str(),
            Self::MessageSent(e) => e.user_id.as_str(),
        }
    }
}

/// Failure mapping between [`DomainEvent`] and [`Event`].
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("unknown event type: {0}")]
    UnknownType(String),

    #[error("failed to encode {event_type} payload: {source}")]
    Encode {
        event_type: EventType,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode {event_type} payload: {source}")]
    Decode {
        event_type: EventType,
        #[source]
        source: serde_json::Error,
    },
}
