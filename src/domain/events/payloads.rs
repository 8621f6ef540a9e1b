//! Event payloads, one struct per event type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{GroupId, GroupName, MatchId, MessageId, UserId, UserName};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreated {
    pub user_id: UserId,
    pub name: UserName,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserUpdated {
    pub user_id: UserId,
    pub name: UserName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupCreated {
    pub group_id: GroupId,
    pub name: GroupName,
    pub owner_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRenamed {
    pub group_id: GroupId,
    pub name: GroupName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDeleted {
    pub group_id: GroupId,
    pub name: GroupName,
    pub owner_id: UserId,
    /// Players at the time of deletion
    pub players: Vec<UserId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAddedToGroup {
    pub group_id: GroupId,
    pub group_name: GroupName,
    pub user_id: UserId,
    pub added_by: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRemovedFromGroup {
    pub group_id: GroupId,
    pub group_name: GroupName,
    pub user_id: UserId,
    pub removed_by: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCreated {
    pub match_id: MatchId,
    pub group_id: GroupId,
    pub scheduled_at: DateTime<Utc>,
    pub created_by: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCancelled {
    pub match_id: MatchId,
    pub group_id: GroupId,
    pub scheduled_at: DateTime<Utc>,
    /// Players who had confirmed attendance
    pub players: Vec<UserId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerJoinedMatch {
    pub match_id: MatchId,
    pub group_id: GroupId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerLeftMatch {
    pub match_id: MatchId,
    pub group_id: GroupId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSent {
    pub message_id: MessageId,
    pub user_id: UserId,
}
