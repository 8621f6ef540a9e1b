//! String identifiers.
//!
//! Every id is an opaque, non-blank string. User ids are the `sub` claim
//! issued by the identity provider; all other ids are generated as UUID v4.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create an id, rejecting blank input.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ValidationError::BlankId { kind: $kind });
                }
                Ok(Self(value))
            }

            /// Generate a fresh random id.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a user, taken from the token subject.
    UserId,
    "user"
);
string_id!(
    /// Identifier of a group.
    GroupId,
    "group"
);
string_id!(
    /// Identifier of a match.
    MatchId,
    "match"
);
string_id!(
    /// Identifier of a notification message.
    MessageId,
    "message"
);
string_id!(
    /// Identifier of a stored event envelope.
    EventId,
    "event"
);
