//! User entity and repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{UserId, UserName};
use crate::shared::error::AppError;

/// A user account mirrored from the identity provider.
///
/// Users are provisioned the first time a valid token with an unknown
/// subject reaches the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Token subject
    pub id: UserId,

    /// Display name (1-64 characters)
    pub name: UserName,

    /// Email address from the token, if the provider shares it
    pub email: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, name: UserName, email: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the display name, bumping `updated_at`.
    pub fn rename(&mut self, name: UserName) {
        self.name = name;
        self.updated_at = Utc::now();
    }
}

/// Repository trait for User data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AppError>;

    /// List all users ordered by name.
    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    /// Insert or replace a user.
    async fn save(&self, user: &User) -> Result<User, AppError>;

    /// Delete a user by id.
    async fn delete(&self, id: &UserId) -> Result<(), AppError>;
}
