//! Request DTOs
//!
//! Data structures for API request bodies.
//!
//! Length rules here are raw caps on the untrimmed input. Exact bounds are
//! enforced after trimming by the domain value objects.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

/// Update own profile request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 256, message = "Name is too long"))]
    pub name: Option<String>,
}

/// Create group request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(max = 256, message = "Name is too long"))]
    pub name: String,
}

/// Rename group request
#[derive(Debug, Deserialize, Validate)]
pub struct RenameGroupRequest {
    #[validate(length(max = 256, message = "Name is too long"))]
    pub name: String,
}

/// Add player to group request
#[derive(Debug, Deserialize, Validate)]
pub struct AddPlayerRequest {
    #[validate(length(min = 1, max = 256, message = "User id must be 1-256 characters"))]
    pub user_id: String,
}

/// Schedule match request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMatchRequest {
    /// RFC 3339 timestamp
    pub scheduled_at: DateTime<Utc>,

    #[validate(length(max = 400, message = "Location is too long"))]
    pub location: Option<String>,
}
