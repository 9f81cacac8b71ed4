//! GuildDirectory port - resolving configured platform resources.
//!
//! Every lookup returns `Ok(None)` when the platform says the resource does
//! not exist, and `Err` only when the round trip itself failed.

use async_trait::async_trait;

use crate::domain::foundation::{ApplicantId, ChannelId, GuildId, RoleId};
use crate::domain::verification::{Channel, Guild, GuildMember, Role};

use super::PlatformError;

/// Port for looking up guilds, channels, roles and members.
#[async_trait]
pub trait GuildDirectory: Send + Sync {
    async fn guild(&self, id: &GuildId) -> Result<Option<Guild>, PlatformError>;

    /// A channel, only if it belongs to `guild`.
    async fn channel(
        &self,
        guild: &GuildId,
        id: &ChannelId,
    ) -> Result<Option<Channel>, PlatformError>;

    async fn role(&self, guild: &GuildId, id: &RoleId) -> Result<Option<Role>, PlatformError>;

    async fn member(
        &self,
        guild: &GuildId,
        applicant: &ApplicantId,
    ) -> Result<Option<GuildMember>, PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn GuildDirectory) {}
}
