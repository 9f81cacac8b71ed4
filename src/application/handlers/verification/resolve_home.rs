//! ResolveHomeHandler - startup resolution of the configured guild,
//! announcement channel and membership role.

use std::sync::Arc;

use crate::domain::foundation::{ChannelId, GuildId, RoleId};
use crate::domain::verification::{Channel, Guild, Role, UnresolvedResource, VerificationError};
use crate::ports::{GuildDirectory, PlatformError};

/// Query for the home resources.
#[derive(Debug, Clone)]
pub struct ResolveHomeQuery {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub role_id: RoleId,
}

/// The resolved home resources.
#[derive(Debug, Clone)]
pub struct HomeResources {
    pub guild: Guild,
    pub channel: Channel,
    pub role: Role,
}

pub struct ResolveHomeHandler {
    directory: Arc<dyn GuildDirectory>,
}

impl ResolveHomeHandler {
    pub fn new(directory: Arc<dyn GuildDirectory>) -> Self {
        Self { directory }
    }

    /// Any resource the platform does not know is a configuration error.
    pub async fn handle(&self, query: ResolveHomeQuery) -> Result<HomeResources, VerificationError> {
        let platform = |e: PlatformError| VerificationError::platform(e.to_string());

        let guild = self
            .directory
            .guild(&query.guild_id)
            .await
            .map_err(platform)?
            .ok_or_else(|| UnresolvedResource::Guild(query.guild_id.clone()))?;

        let channel = self
            .directory
            .channel(&query.guild_id, &query.channel_id)
            .await
            .map_err(platform)?
            .ok_or_else(|| UnresolvedResource::Channel(query.channel_id.clone()))?;

        let role = self
            .directory
            .role(&query.guild_id, &query.role_id)
            .await
            .map_err(platform)?
            .ok_or_else(|| UnresolvedResource::Role(query.role_id.clone()))?;

        tracing::info!(
            guild_id = %guild.id,
            guild = %guild.name,
            channel_id = %channel.id,
            role_id = %role.id,
            role = %role.name,
            "Home resources resolved"
        );

        Ok(HomeResources {
            guild,
            channel,
            role,
        })
    }
}
