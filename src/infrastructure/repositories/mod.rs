//! Repository Implementations
//!
//! Concrete implementations of the repository traits defined in the domain
//! layer. Each entity has a PostgreSQL implementation; `memory` holds
//! process-local implementations of all of them.
//!
//! ## Available Repositories
//!
//! - **UserRepository** - Users mirrored from the identity provider
//! - **GroupRepository** - Groups and their player lists
//! - **MatchRepository** - Matches scheduled within groups
//! - **MessageRepository** - Notification messages
//! - **EventRepository** - Append-only event envelopes
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use squad_server::infrastructure::repositories::{PgGroupRepository, PgUserRepository};
//!
//! fn setup_repositories(pool: PgPool) {
//!     let user_repo = PgUserRepository::new(pool.clone());
//!     let group_repo = PgGroupRepository::new(pool);
//! }
//! ```

pub mod event_repository;
pub mod group_repository;
pub mod match_repository;
pub mod memory;
pub mod message_repository;
pub mod user_repository;

pub use event_repository::PgEventRepository;
pub use group_repository::PgGroupRepository;
pub use match_repository::PgMatchRepository;
pub use memory::{
    InMemoryEventRepository, InMemoryGroupRepository, InMemoryMatchRepository,
    InMemoryMessageRepository, InMemoryUserRepository,
};
pub use message_repository::PgMessageRepository;
pub use user_repository::PgUserRepository;

use crate::domain::value_objects::ValidationError;
use crate::shared::error::AppError;

/// A stored row no longer satisfies the value-object rules.
pub(crate) fn corrupt_row(table: &str, err: ValidationError) -> AppError {
    AppError::Internal(format!("Invalid row in {}: {}", table, err))
}
