//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and validation errors that form the
//! vocabulary of the age gate domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{ApplicantId, ChannelId, GuildId, MessageId, RoleId, SessionToken};
pub use timestamp::Timestamp;
