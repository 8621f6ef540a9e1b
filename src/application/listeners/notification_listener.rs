//! Turns domain events into notification messages for the affected users.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::application::services::MessageService;
use crate::domain::events::{GroupDeleted, MatchCancelled, MatchCreated};
use crate::domain::{DomainEvent, GroupRepository, MessageContent, UserId};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

const LISTENER_NAME: &str = "notification";

/// Listener creating inbox messages in reaction to group and match events.
#[derive(Clone)]
pub struct NotificationListener {
    messages: Arc<dyn MessageService>,
    groups: Arc<dyn GroupRepository>,
}

impl NotificationListener {
    pub fn new(messages: Arc<dyn MessageService>, groups: Arc<dyn GroupRepository>) -> Self {
        Self { messages, groups }
    }

    /// Consume events until the bus closes.
    ///
    /// Every event is handled in its own task; failures are logged and
    /// counted, never retried.
    pub fn spawn(self, mut rx: broadcast::Receiver<DomainEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            tracing::debug!("Notification listener started");

            loop {
                match rx.recv().await {
                    Ok(event) => {
                        let listener = self.clone();
                        tokio::spawn(async move {
                            if let Err(e) = listener.handle(&event).await {
                                metrics::record_listener_failure(LISTENER_NAME);
                                tracing::error!(
                                    event_type = %event.event_type(),
                                    error = %e,
                                    "Failed to create notifications"
                                );
                            }
                        });
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Notification listener lagged behind the event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::debug!("Event bus closed, stopping notification listener");
                        break;
                    }
                }
            }
        })
    }

    /// Create the notifications for one event. Returns how many were sent.
    pub async fn handle(&self, event: &DomainEvent) -> Result<usize, AppError> {
        let (recipients, text) = match event {
            DomainEvent::PlayerAddedToGroup(e) => (
                vec![e.user_id.clone()],
                format!("You were added to the group {}", e.group_name),
            ),
            DomainEvent::PlayerRemovedFromGroup(e) => (
                vec![e.user_id.clone()],
                format!("You were removed from the group {}", e.group_name),
            ),
            DomainEvent::MatchCreated(e) => self.match_created(e).await?,
            DomainEvent::MatchCancelled(e) => match_cancelled(e),
            DomainEvent::GroupDeleted(e) => group_deleted(e),
            _ => return Ok(0),
        };

        self.notify(recipients, text).await
    }

    async fn match_created(&self, event: &MatchCreated) -> Result<(Vec<UserId>, String), AppError> {
        let Some(group) = self.groups.find_by_id(&event.group_id).await? else {
            tracing::debug!(group_id = %event.group_id, "Group gone before match notification");
            return Ok((Vec::new(), String::new()));
        };

        let recipients = group
            .players
            .into_iter()
            .filter(|p| p != &event.created_by)
            .collect();
        let text = format!(
            "A new match in {} is scheduled for {}",
            group.name,
            event.scheduled_at.format("%Y-%m-%d %H:%M UTC")
        );
        Ok((recipients, text))
    }

    async fn notify(&self, recipients: Vec<UserId>, text: String) -> Result<usize, AppError> {
        if recipients.is_empty() {
            return Ok(0);
        }
        let content = MessageContent::new(text)?;

        let results = join_all(
            recipients
                .into_iter()
                .map(|user_id| self.messages.send_notification(user_id, content.clone())),
        )
        .await;

        let mut sent = 0;
        for result in results {
            result?;
            sent += 1;
        }
        Ok(sent)
    }
}

fn match_cancelled(event: &MatchCancelled) -> (Vec<UserId>, String) {
    let text = format!(
        "The match scheduled for {} was cancelled",
        event.scheduled_at.format("%Y-%m-%d %H:%M UTC")
    );
    (event.players.clone(), text)
}

fn group_deleted(event: &GroupDeleted) -> (Vec<UserId>, String) {
    let recipients = event
        .players
        .iter()
        .filter(|p| *p != &event.owner_id)
        .cloned()
        .collect();
    (recipients, format!("The group {} was deleted", event.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{MessageServiceImpl, MockMessageService};
    use crate::domain::events::{GroupRenamed, PlayerAddedToGroup, PlayerRemovedFromGroup};
    use crate::domain::{Group, GroupId, GroupName, MatchId, Message, MessageRepository};
    use crate::infrastructure::events::{EventBus, EventPublisher};
    use crate::infrastructure::repositories::{
        InMemoryEventRepository, InMemoryGroupRepository, InMemoryMessageRepository,
    };
    use chrono::Utc;
    use mockall::predicate::eq;
    use std::time::Duration;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn listener_with(messages: MockMessageService) -> NotificationListener {
        NotificationListener::new(Arc::new(messages), Arc::new(InMemoryGroupRepository::new()))
    }

    #[tokio::test]
    async fn test_added_player_is_notified() {
        let mut messages = MockMessageService::new();
        messages
            .expect_send_notification()
            .with(eq(user("p1")), mockall::predicate::always())
            .times(1)
            .returning(|user_id, content| Ok(Message::new(user_id, content)));

        let event = DomainEvent::PlayerAddedToGroup(PlayerAddedToGroup {
            group_id: GroupId::new("g-1").unwrap(),
            group_name: GroupName::new("Tuesday Futsal").unwrap(),
            user_id: user("p1"),
            added_by: user("owner"),
        });

        assert_eq!(listener_with(messages).handle(&event).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_removed_player_is_notified() {
        let mut messages = MockMessageService::new();
        messages
            .expect_send_notification()
            .withf(|user_id, content| {
                user_id.as_str() == "p1"
                    && content.as_str() == "You were removed from the group Tuesday Futsal"
            })
            .times(1)
            .returning(|user_id, content| Ok(Message::new(user_id, content)));

        let event = DomainEvent::PlayerRemovedFromGroup(PlayerRemovedFromGroup {
            group_id: GroupId::new("g-1").unwrap(),
            group_name: GroupName::new("Tuesday Futsal").unwrap(),
            user_id: user("p1"),
            removed_by: user("owner"),
        });

        assert_eq!(listener_with(messages).handle(&event).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_group_deleted_skips_owner() {
        let mut messages = MockMessageService::new();
        messages
            .expect_send_notification()
            .times(2)
            .returning(|user_id, content| Ok(Message::new(user_id, content)));

        let event = DomainEvent::GroupDeleted(GroupDeleted {
            group_id: GroupId::new("g-1").unwrap(),
            name: GroupName::new("Tuesday Futsal").unwrap(),
            owner_id: user("owner"),
            players: vec![user("owner"), user("p1"), user("p2")],
        });

        assert_eq!(listener_with(messages).handle(&event).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unrelated_event_is_ignored() {
        let mut messages = MockMessageService::new();
        messages.expect_send_notification().never();

        let event = DomainEvent::GroupRenamed(GroupRenamed {
            group_id: GroupId::new("g-1").unwrap(),
            name: GroupName::new("Thursday Futsal").unwrap(),
        });

        assert_eq!(listener_with(messages).handle(&event).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_match_created_notifies_group_except_creator() {
        let groups = Arc::new(InMemoryGroupRepository::new());
        let mut group = Group::new(GroupName::new("Tuesday Futsal").unwrap(), user("owner"));
        group.add_player(user("p1")).unwrap();
        group.add_player(user("p2")).unwrap();
        groups.save(&group).await.unwrap();

        let inbox = Arc::new(InMemoryMessageRepository::new());
        let publisher = EventPublisher::new(
            Arc::new(InMemoryEventRepository::new()),
            Arc::new(EventBus::new(16)),
        );
        let listener = NotificationListener::new(
            Arc::new(MessageServiceImpl::new(inbox.clone(), publisher)),
            groups,
        );

        let event = DomainEvent::MatchCreated(MatchCreated {
            match_id: MatchId::new("m-1").unwrap(),
            group_id: group.id.clone(),
            scheduled_at: Utc::now(),
            created_by: user("p1"),
        });

        assert_eq!(listener.handle(&event).await.unwrap(), 2);
        assert!(inbox.find_by_user(&user("p1")).await.unwrap().is_empty());
        let owner_inbox = inbox.find_by_user(&user("owner")).await.unwrap();
        assert!(owner_inbox[0].content.as_str().contains("Tuesday Futsal"));
    }

    #[tokio::test]
    async fn test_spawned_listener_consumes_bus() {
        let bus = EventBus::new(16);
        let inbox = Arc::new(InMemoryMessageRepository::new());
        let publisher = EventPublisher::new(
            Arc::new(InMemoryEventRepository::new()),
            Arc::new(EventBus::new(16)),
        );
        let listener = NotificationListener::new(
            Arc::new(MessageServiceImpl::new(inbox.clone(), publisher)),
            Arc::new(InMemoryGroupRepository::new()),
        );
        let handle = listener.spawn(bus.subscribe());

        bus.emit(DomainEvent::PlayerAddedToGroup(PlayerAddedToGroup {
            group_id: GroupId::new("g-1").unwrap(),
            group_name: GroupName::new("Tuesday Futsal").unwrap(),
            user_id: user("p1"),
            added_by: user("owner"),
        }));

        let mut delivered = false;
        for _ in 0..50 {
            if !inbox.find_by_user(&user("p1")).await.unwrap().is_empty() {
                delivered = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(delivered);

        drop(bus);
        handle.await.unwrap();
    }
}
