//! User Service
//!
//! Handles user provisioning and profile management.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::events::{DomainEvent, UserCreated, UserUpdated};
use crate::domain::{User, UserId, UserName, UserRepository};
use crate::infrastructure::events::EventPublisher;
use crate::shared::error::AppError;

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Return the caller's user record, creating it on first sight.
    async fn current_user(&self, identity: ProvisionUserDto) -> Result<User, UserError>;

    /// Get user by ID
    async fn get_user(&self, user_id: &UserId) -> Result<User, UserError>;

    /// List every known user
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Update user profile
    async fn update_profile(&self, user_id: &UserId, update: UpdateProfileDto) -> Result<User, UserError>;
}

/// Identity taken from token claims
#[derive(Debug, Clone)]
pub struct ProvisionUserDto {
    pub id: UserId,
    pub name: UserName,
    pub email: Option<String>,
}

/// Update profile request
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileDto {
    pub name: Option<UserName>,
}

/// User service errors
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound => AppError::NotFound("User not found".into()),
            UserError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// UserService implementation
pub struct UserServiceImpl {
    user_repo: Arc<dyn UserRepository>,
    publisher: EventPublisher,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>, publisher: EventPublisher) -> Self {
        Self {
            user_repo,
            publisher,
        }
    }

    async fn find(&self, user_id: &UserId) -> Result<User, UserError> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?
            .ok_or(UserError::NotFound)
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn current_user(&self, identity: ProvisionUserDto) -> Result<User, UserError> {
        if let Some(user) = self
            .user_repo
            .find_by_id(&identity.id)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?
        {
            return Ok(user);
        }

        let user = User::new(identity.id, identity.name, identity.email);
        let created = self
            .user_repo
            .save(&user)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?;

        tracing::info!(user_id = %created.id, "User provisioned");

        self.publisher
            .publish(DomainEvent::UserCreated(UserCreated {
                user_id: created.id.clone(),
                name: created.name.clone(),
                email: created.email.clone(),
            }))
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?;

        Ok(created)
    }

    async fn get_user(&self, user_id: &UserId) -> Result<User, UserError> {
        self.find(user_id).await
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.user_repo
            .find_all()
            .await
            .map_err(|e| UserError::Internal(e.to_string()))
    }

    async fn update_profile(&self, user_id: &UserId, update: UpdateProfileDto) -> Result<User, UserError> {
        let mut user = self.find(user_id).await?;

        let Some(name) = update.name else {
            return Ok(user);
        };
        user.rename(name);

        let updated = self
            .user_repo
            .save(&user)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?;

        self.publisher
            .publish(DomainEvent::UserUpdated(UserUpdated {
                user_id: updated.id.clone(),
                name: updated.name.clone(),
            }))
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?;

        Ok(updated)
    }
}
