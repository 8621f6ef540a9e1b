//! Match Service
//!
//! Scheduling matches within a group and tracking who plays.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::events::{
    DomainEvent, MatchCancelled, MatchCreated, PlayerJoinedMatch, PlayerLeftMatch,
};
use crate::domain::{
    Group, GroupId, GroupRepository, Match, MatchId, MatchLocation, MatchRepository,
    MembershipError, UserId,
};
use crate::infrastructure::events::EventPublisher;
use crate::shared::error::AppError;

/// Match service trait
#[async_trait]
pub trait MatchService: Send + Sync {
    /// Schedule a match in a group the actor plays in
    async fn create_match(&self, actor_id: &UserId, group_id: &GroupId, request: CreateMatchDto) -> Result<Match, MatchError>;

    /// All matches of a group
    async fn list_matches(&self, actor_id: &UserId, group_id: &GroupId) -> Result<Vec<Match>, MatchError>;

    async fn get_match(&self, actor_id: &UserId, match_id: &MatchId) -> Result<Match, MatchError>;

    /// Confirm attendance
    async fn join_match(&self, actor_id: &UserId, match_id: &MatchId) -> Result<Match, MatchError>;

    /// Withdraw attendance
    async fn leave_match(&self, actor_id: &UserId, match_id: &MatchId) -> Result<Match, MatchError>;

    /// Cancel a match (group owner only)
    async fn cancel_match(&self, actor_id: &UserId, match_id: &MatchId) -> Result<Match, MatchError>;
}

/// Create match request
#[derive(Debug, Clone)]
pub struct CreateMatchDto {
    pub scheduled_at: DateTime<Utc>,
    pub location: Option<MatchLocation>,
}

/// Match service errors
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("Match not found")]
    NotFound,

    #[error("Group not found")]
    GroupNotFound,

    #[error("Not a player of this group")]
    NotAGroupPlayer,

    #[error("Only the group owner may do this")]
    NotOwner,

    #[error("Matches cannot be scheduled in the past")]
    InPast,

    #[error(transparent)]
    Membership(#[from] MembershipError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<MatchError> for AppError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::NotFound => AppError::NotFound("Match not found".into()),
            MatchError::GroupNotFound => AppError::NotFound("Group not found".into()),
            MatchError::NotAGroupPlayer | MatchError::NotOwner => {
                AppError::NotAuthorized(err.to_string())
            }
            MatchError::InPast => AppError::Validation(err.to_string()),
            MatchError::Membership(e) => AppError::Conflict(e.to_string()),
            MatchError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// MatchService implementation
pub struct MatchServiceImpl {
    match_repo: Arc<dyn MatchRepository>,
    group_repo: Arc<dyn GroupRepository>,
    publisher: EventPublisher,
}

impl MatchServiceImpl {
    pub fn new(
        match_repo: Arc<dyn MatchRepository>,
        group_repo: Arc<dyn GroupRepository>,
        publisher: EventPublisher,
    ) -> Self {
        Self {
            match_repo,
            group_repo,
            publisher,
        }
    }

    /// Load the group and check the actor plays in it.
    async fn group_for(&self, actor_id: &UserId, group_id: &GroupId) -> Result<Group, MatchError> {
        let group = self
            .group_repo
            .find_by_id(group_id)
            .await
            .map_err(|e| MatchError::Internal(e.to_string()))?
            .ok_or(MatchError::GroupNotFound)?;

        if !group.has_player(actor_id) {
            return Err(MatchError::NotAGroupPlayer);
        }
        Ok(group)
    }

    /// Load a match together with its group, checking group membership.
    async fn match_for(&self, actor_id: &UserId, match_id: &MatchId) -> Result<(Match, Group), MatchError> {
        let game = self
            .match_repo
            .find_by_id(match_id)
            .await
            .map_err(|e| MatchError::Internal(e.to_string()))?
            .ok_or(MatchError::NotFound)?;

        let group = self.group_for(actor_id, &game.group_id).await?;
        Ok((game, group))
    }

    async fn save_and_publish(&self, game: &Match, event: DomainEvent) -> Result<Match, MatchError> {
        let saved = self
            .match_repo
            .save(game)
            .await
            .map_err(|e| MatchError::Internal(e.to_string()))?;

        self.publisher
            .publish(event)
            .await
            .map_err(|e| MatchError::Internal(e.to_string()))?;

        Ok(saved)
    }
}

#[async_trait]
impl MatchService for MatchServiceImpl {
    async fn create_match(&self, actor_id: &UserId, group_id: &GroupId, request: CreateMatchDto) -> Result<Match, MatchError> {
        self.group_for(actor_id, group_id).await?;

        if request.scheduled_at < Utc::now() {
            return Err(MatchError::InPast);
        }

        let game = Match::schedule(
            group_id.clone(),
            request.scheduled_at,
            request.location,
            actor_id.clone(),
        );

        let event = DomainEvent::MatchCreated(MatchCreated {
            match_id: game.id.clone(),
            group_id: group_id.clone(),
            scheduled_at: game.scheduled_at,
            created_by: actor_id.clone(),
        });

        let saved = self.save_and_publish(&game, event).await?;
        tracing::info!(match_id = %saved.id, group_id = %group_id, "Match scheduled");
        Ok(saved)
    }

    async fn list_matches(&self, actor_id: &UserId, group_id: &GroupId) -> Result<Vec<Match>, MatchError> {
        self.group_for(actor_id, group_id).await?;

        self.match_repo
            .find_by_group(group_id)
            .await
            .map_err(|e| MatchError::Internal(e.to_string()))
    }

    async fn get_match(&self, actor_id: &UserId, match_id: &MatchId) -> Result<Match, MatchError> {
        let (game, _) = self.match_for(actor_id, match_id).await?;
        Ok(game)
    }

    async fn join_match(&self, actor_id: &UserId, match_id: &MatchId) -> Result<Match, MatchError> {
        let (mut game, _) = self.match_for(actor_id, match_id).await?;
        game.join(actor_id.clone())?;

        let event = DomainEvent::PlayerJoinedMatch(PlayerJoinedMatch {
            match_id: game.id.clone(),
            group_id: game.group_id.clone(),
            user_id: actor_id.clone(),
        });
        self.save_and_publish(&game, event).await
    }

    async fn leave_match(&self, actor_id: &UserId, match_id: &MatchId) -> Result<Match, MatchError> {
        let (mut game, _) = self.match_for(actor_id, match_id).await?;
        game.leave(actor_id)?;

        let event = DomainEvent::PlayerLeftMatch(PlayerLeftMatch {
            match_id: game.id.clone(),
            group_id: game.group_id.clone(),
            user_id: actor_id.clone(),
        });
        self.save_and_publish(&game, event).await
    }

    async fn cancel_match(&self, actor_id: &UserId, match_id: &MatchId) -> Result<Match, MatchError> {
        let (mut game, group) = self.match_for(actor_id, match_id).await?;
        if !group.is_owner(actor_id) {
            return Err(MatchError::NotOwner);
        }
        game.cancel()?;

        let event = DomainEvent::MatchCancelled(MatchCancelled {
            match_id: game.id.clone(),
            group_id: game.group_id.clone(),
            scheduled_at: game.scheduled_at,
            players: game.players.clone(),
        });
        self.save_and_publish(&game, event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GroupName, MatchStatus};
    use crate::infrastructure::events::EventBus;
    use crate::infrastructure::repositories::{
        InMemoryEventRepository, InMemoryGroupRepository, InMemoryMatchRepository,
    };
    use chrono::Duration;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn next_week() -> CreateMatchDto {
        CreateMatchDto {
            scheduled_at: Utc::now() + Duration::days(7),
            location: Some(MatchLocation::new("Riverside Pitch 2").unwrap()),
        }
    }

    /// Service plus a stored group owned by "owner" with player "p1".
    async fn fixture() -> (MatchServiceImpl, Group) {
        let groups = Arc::new(InMemoryGroupRepository::new());
        let mut group = Group::new(GroupName::new("Tuesday Futsal").unwrap(), user("owner"));
        group.add_player(user("p1")).unwrap();
        groups.save(&group).await.unwrap();

        let publisher = EventPublisher::new(
            Arc::new(InMemoryEventRepository::new()),
            Arc::new(EventBus::new(64)),
        );
        let service = MatchServiceImpl::new(Arc::new(InMemoryMatchRepository::new()), groups, publisher);
        (service, group)
    }

    #[tokio::test]
    async fn test_player_schedules_and_others_join() {
        let (service, group) = fixture().await;

        let game = service.create_match(&user("p1"), &group.id, next_week()).await.unwrap();
        let game = service.join_match(&user("owner"), &game.id).await.unwrap();

        assert_eq!(game.players, vec![user("p1"), user("owner")]);
        assert_eq!(service.list_matches(&user("owner"), &group.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_outsider_cannot_schedule_or_read() {
        let (service, group) = fixture().await;
        let game = service.create_match(&user("owner"), &group.id, next_week()).await.unwrap();

        assert!(matches!(
            service.create_match(&user("stranger"), &group.id, next_week()).await,
            Err(MatchError::NotAGroupPlayer)
        ));
        assert!(matches!(
            service.get_match(&user("stranger"), &game.id).await,
            Err(MatchError::NotAGroupPlayer)
        ));
    }

    #[tokio::test]
    async fn test_past_match_rejected() {
        let (service, group) = fixture().await;
        let request = CreateMatchDto {
            scheduled_at: Utc::now() - Duration::hours(1),
            location: None,
        };

        assert!(matches!(
            service.create_match(&user("owner"), &group.id, request).await,
            Err(MatchError::InPast)
        ));
    }

    #[tokio::test]
    async fn test_only_owner_cancels() {
        let (service, group) = fixture().await;
        let game = service.create_match(&user("p1"), &group.id, next_week()).await.unwrap();

        assert!(matches!(
            service.cancel_match(&user("p1"), &game.id).await,
            Err(MatchError::NotOwner)
        ));

        let cancelled = service.cancel_match(&user("owner"), &game.id).await.unwrap();
        assert_eq!(cancelled.status, MatchStatus::Cancelled);

        assert!(matches!(
            service.join_match(&user("owner"), &game.id).await,
            Err(MatchError::Membership(MembershipError::MatchCancelled))
        ));
    }

    #[tokio::test]
    async fn test_leave_without_joining() {
        let (service, group) = fixture().await;
        let game = service.create_match(&user("owner"), &group.id, next_week()).await.unwrap();

        assert!(matches!(
            service.leave_match(&user("p1"), &game.id).await,
            Err(MatchError::Membership(MembershipError::NotAPlayer))
        ));
    }

    #[tokio::test]
    async fn test_unknown_match() {
        let (service, _) = fixture().await;
        let err = service
            .get_match(&user("owner"), &MatchId::new("nope").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, MatchError::NotFound));
        assert!(matches!(AppError::from(err), AppError::NotFound(_)));
    }
}
