//! Bounded-length text values.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Trim `value` and check its character count against `min..=max`.
fn bounded(
    value: impl Into<String>,
    field: &'static str,
    min: usize,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.into().trim().to_string();
    let actual = trimmed.chars().count();
    if actual < min || actual > max {
        return Err(ValidationError::NameLength {
            field,
            min,
            max,
            actual,
        });
    }
    Ok(trimmed)
}

macro_rules! bounded_text {
    ($(#[$meta:meta])* $name:ident, $field:literal, $min:expr, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub const MIN_LENGTH: usize = $min;
            pub const MAX_LENGTH: usize = $max;

            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                bounded(value, $field, Self::MIN_LENGTH, Self::MAX_LENGTH).map(Self)
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
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

bounded_text!(
    /// Display name of a group (3-50 characters).
    GroupName,
    "group name",
    3,
    50
);
bounded_text!(
    /// Display name of a user (1-64 characters).
    UserName,
    "user name",
    1,
    64
);
bounded_text!(
    /// Body of a notification message (1-500 characters).
    MessageContent,
    "message content",
    1,
    500
);
bounded_text!(
    /// Where a match takes place (1-100 characters).
    MatchLocation,
    "match location",
    1,
    100
);
