//! Strongly-typed identifier value objects.
//!
//! Platform identifiers are snowflakes: decimal strings of up to 20 digits.
//! They are kept as strings so they round-trip through JSON payloads unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Maximum number of digits in a platform snowflake (u64::MAX has 20).
const MAX_SNOWFLAKE_DIGITS: usize = 20;

fn validate_snowflake(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if value.len() > MAX_SNOWFLAKE_DIGITS || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            field,
            format!("'{}' is not a numeric snowflake", value),
        ));
    }
    Ok(())
}

macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates the identifier, rejecting anything that is not a snowflake.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                validate_snowflake($field, &id)?;
                Ok(Self(id))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

snowflake_id!(
    /// The platform user who is applying for access.
    ApplicantId,
    "applicant_id"
);

snowflake_id!(
    /// The community space (guild) being gated.
    GuildId,
    "guild_id"
);

snowflake_id!(
    /// The channel that carries the call-to-action announcement.
    ChannelId,
    "channel_id"
);

snowflake_id!(
    /// The membership capability granted on a passing verification.
    RoleId,
    "role_id"
);

snowflake_id!(
    /// A message posted in a channel.
    MessageId,
    "message_id"
);

/// Opaque token scoping one presented form to one applicant.
///
/// Embedded in the form's custom id and checked on submission, so a form
/// from an earlier or concurrent session is recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(Uuid);

impl SessionToken {
    /// Creates a new random SessionToken.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
