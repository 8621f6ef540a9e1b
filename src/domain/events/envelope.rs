//! Generic event envelope and the mapping to and from [`DomainEvent`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{DomainEvent, EventError, EventType};
use crate::domain::value_objects::EventId;
use crate::shared::error::AppError;

/// Storage and transport form of a domain event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub event_type: EventType,
    pub aggregate_id: String,
    pub payload: Value,
    pub occurred_at: DateTime<Utc>,
}

fn encode<T: Serialize>(event_type: EventType, payload: &T) -> Result<Value, EventError> {
    serde_json::to_value(payload).map_err(|source| EventError::Encode { event_type, source })
}

fn decode<T: DeserializeOwned>(event_type: EventType, payload: &Value) -> Result<T, EventError> {
    T::deserialize(payload).map_err(|source| EventError::Decode { event_type, source })
}

/// Wrap a domain event into a fresh envelope.
pub fn serialize_event(event: &DomainEvent) -> Result<Event, EventError> {
    let event_type = event.event_type();
    let payload = match event {
        DomainEvent::UserCreated(e) => encode(event_type, e)?,
        DomainEvent::UserUpdated(e) => encode(event_type, e)?,
        DomainEvent::GroupCreated(e) => encode(event_type, e)?,
        DomainEvent::GroupRenamed(e) => encode(event_type, e)?,
        DomainEvent::GroupDeleted(e) => encode(event_type, e)?,
        DomainEvent::PlayerAddedToGroup(e) => encode(event_type, e)?,
        DomainEvent::PlayerRemovedFromGroup(e) => encode(event_type, e)?,
        DomainEvent::MatchCreated(e) => encode(event_type, e)?,
        DomainEvent::MatchCancelled(e) => encode(event_type, e)?,
        DomainEvent::PlayerJoinedMatch(e) => encode(event_type, e)?,
        DomainEvent::PlayerLeftMatch(e) => encode(event_type, e)?,
        DomainEvent::MessageSent(e) => encode(event_type, e)?,
    };

    Ok(Event {
        id: EventId::generate(),
        event_type,
        aggregate_id: event.aggregate_id().to_string(),
        payload,
        occurred_at: Utc::now(),
    })
}

/// Recover the domain event from an envelope, dispatching on its tag.
pub fn deserialize_event(event: &Event) -> Result<DomainEvent, EventError> {
    let t = event.event_type;
    let p = &event.payload;
    Ok(match t {
        EventType::UserCreatedV1 => DomainEvent::UserCreated(decode(t, p)?),
        EventType::UserUpdatedV1 => DomainEvent::UserUpdated(decode(t, p)?),
        EventType::GroupCreatedV1 => DomainEvent::GroupCreated(decode(t, p)?),
        EventType::GroupRenamedV1 => DomainEvent::GroupRenamed(decode(t, p)?),
        EventType::GroupDeletedV1 => DomainEvent::GroupDeleted(decode(t, p)?),
        EventType::PlayerAddedToGroupV1 => DomainEvent::PlayerAddedToGroup(decode(t, p)?),
        EventType::PlayerRemovedFromGroupV1 => DomainEvent::PlayerRemovedFromGroup(decode(t, p)?),
        EventType::MatchCreatedV1 => DomainEvent::MatchCreated(decode(t, p)?),
        EventType::MatchCancelledV1 => DomainEvent::MatchCancelled(decode(t, p)?),
        EventType::PlayerJoinedMatchV1 => DomainEvent::PlayerJoinedMatch(decode(t, p)?),
        EventType::PlayerLeftMatchV1 => DomainEvent::PlayerLeftMatch(decode(t, p)?),
        EventType::MessageSentV1 => DomainEvent::MessageSent(decode(t, p)?),
    })
}

/// Append-only store of event envelopes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn append(&self, event: &Event) -> Result<(), AppError>;

    /// Events filed under an aggregate, oldest first.
    async fn find_by_aggregate(&self, aggregate_id: &str) -> Result<Vec<Event>, AppError>;
}
