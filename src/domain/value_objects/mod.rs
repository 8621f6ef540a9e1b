//! # Domain Value Objects
//!
//! Immutable value types validated at construction.
//!
//! ## Value Objects
//!
//! - **Ids**: non-blank string identifiers for users, groups, matches, messages and events
//! - **Names**: bounded-length text (group names, user names, message content, match locations)

mod ids;
mod names;

pub use ids::*;
pub use names::*;

/// Failure to construct a value object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{kind} id must not be blank")]
    BlankId { kind: &'static str },

    #[error("{field} must be between {min} and {max} characters (got {actual})")]
    NameLength {
        field: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },
}
