//! Gated guild configuration

use serde::Deserialize;

use crate::domain::foundation::{ChannelId, GuildId, RoleId};

use super::error::ValidationError;

/// Identifiers of the gated space, its announcement channel and the
/// membership role
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuildConfig {
    pub guild_id: String,
    pub channel_id: String,
    pub role_id: String,
}

impl GuildConfig {
    pub fn guild(&self) -> Result<GuildId, ValidationError> {
        GuildId::new(self.guild_id.as_str()).map_err(|_| ValidationError::InvalidSnowflake("GUILD__GUILD_ID"))
    }

    pub fn channel(&self) -> Result<ChannelId, ValidationError> {
        ChannelId::new(self.channel_id.as_str())
            .map_err(|_| ValidationError::InvalidSnowflake("GUILD__CHANNEL_ID"))
    }

    pub fn role(&self) -> Result<RoleId, ValidationError> {
        RoleId::new(self.role_id.as_str()).map_err(|_| ValidationError::InvalidSnowflake("GUILD__ROLE_ID"))
    }

    /// Validate guild configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.guild_id.is_empty() {
            return Err(ValidationError::MissingRequired("GUILD__GUILD_ID"));
        }
        if self.channel_id.is_empty() {
            return Err(ValidationError::MissingRequired("GUILD__CHANNEL_ID"));
        }
        if self.role_id.is_empty() {
            return Err(ValidationError::MissingRequired("GUILD__ROLE_ID"));
        }
        self.guild()?;
        self.channel()?;
        self.role()?;
        Ok(())
    }
}
