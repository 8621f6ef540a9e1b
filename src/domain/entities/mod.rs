//! # Domain Entities
//!
//! Core domain entities for organizing amateur sports.
//!
//! - **User**: a person known to the identity provider
//! - **Group**: a team or circle of players owned by one user
//! - **Match**: a scheduled game inside a group
//! - **Message**: a notification addressed to one user
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait (persistence port) defining
//! data access operations. These traits are implemented in the infrastructure
//! layer, following the dependency inversion principle.

mod group;
mod matches;
mod message;
mod user;

pub use group::{Group, GroupRepository};
pub use matches::{Match, MatchRepository, MatchStatus};
pub use message::{Message, MessageRepository};
pub use user::{User, UserRepository};

#[cfg(test)]
pub use group::MockGroupRepository;
#[cfg(test)]
pub use matches::MockMatchRepository;
#[cfg(test)]
pub use message::MockMessageRepository;
#[cfg(test)]
pub use user::MockUserRepository;

/// Violation of a player-list rule on a group or match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MembershipError {
    #[error("user is already a player")]
    AlreadyPlayer,

    #[error("user is not a player")]
    NotAPlayer,

    #[error("the group owner cannot be removed")]
    OwnerCannotLeave,

    #[error("match has been cancelled")]
    MatchCancelled,
}
