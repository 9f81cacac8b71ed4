//! Cache-then-fetch decorator for `GuildDirectory`.
//!
//! Guild, channel and role lookups are served from memory once resolved.
//! Members are never cached: their roles change as a result of our own
//! actions. Misses are not cached either, so a resource created after a
//! failed lookup is picked up on the next call.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{ApplicantId, ChannelId, GuildId, RoleId};
use crate::domain::verification::{Channel, Guild, GuildMember, Role};
use crate::ports::{GuildDirectory, PlatformError};

#[derive(Default)]
struct DirectoryCache {
    guilds: HashMap<GuildId, Guild>,
    channels: HashMap<(GuildId, ChannelId), Channel>,
    roles: HashMap<(GuildId, RoleId), Role>,
}

pub struct CachedGuildDirectory {
    inner: Arc<dyn GuildDirectory>,
    cache: RwLock<DirectoryCache>,
}

impl CachedGuildDirectory {
    pub fn new(inner: Arc<dyn GuildDirectory>) -> Self {
        Self {
            inner,
            cache: RwLock::new(DirectoryCache::default()),
        }
    }
}

#[async_trait]
impl GuildDirectory for CachedGuildDirectory {
    async fn guild(&self, id: &GuildId) -> Result<Option<Guild>, PlatformError> {
        if let Some(guild) = self.cache.read().await.guilds.get(id) {
            return Ok(Some(guild.clone()));
        }

        let fetched = self.inner.guild(id).await?;
        if let Some(guild) = &fetched {
            self.cache
                .write()
                .await
                .guilds
                .insert(id.clone(), guild.clone());
        }
        Ok(fetched)
    }

    async fn channel(
        &self,
        guild: &GuildId,
        id: &ChannelId,
    ) -> Result<Option<Channel>, PlatformError> {
        let key = (guild.clone(), id.clone());
        if let Some(channel) = self.cache.read().await.channels.get(&key) {
            return Ok(Some(channel.clone()));
        }

        let fetched = self.inner.channel(guild, id).await?;
        if let Some(channel) = &fetched {
            self.cache.write().await.channels.insert(key, channel.clone());
        }
        Ok(fetched)
    }

    async fn role(&self, guild: &GuildId, id: &RoleId) -> Result<Option<Role>, PlatformError> {
        let key = (guild.clone(), id.clone());
        if let Some(role) = self.cache.read().await.roles.get(&key) {
            return Ok(Some(role.clone()));
        }

        let fetched = self.inner.role(guild, id).await?;
        if let Some(role) = &fetched {
            self.cache.write().await.roles.insert(key, role.clone());
        }
        Ok(fetched)
    }

    async fn member(
        &self,
        guild: &GuildId,
        applicant: &ApplicantId,
    ) -> Result<Option<GuildMember>, PlatformError> {
        self.inner.member(guild, applicant).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::discord::MockPlatform;
    use crate::adapters::journal::CallJournal;

    fn ids() -> (GuildId, ChannelId, RoleId) {
        (
            GuildId::new("100").unwrap(),
            ChannelId::new("200").unwrap(),
            RoleId::new("300").unwrap(),
        )
    }

    #[tokio::test]
    async fn second_lookup_is_served_from_cache() {
        let (guild, channel, role) = ids();
        let platform = Arc::new(
            MockPlatform::new(CallJournal::new())
                .with_guild(guild.clone())
                .with_channel(&guild, channel.clone())
                .with_role(&guild, role.clone()),
        );
        let directory = CachedGuildDirectory::new(platform.clone());

        for _ in 0..3 {
            assert!(directory.guild(&guild).await.unwrap().is_some());
            assert!(directory.channel(&guild, &channel).await.unwrap().is_some());
            assert!(directory.role(&guild, &role).await.unwrap().is_some());
        }

        assert_eq!(platform.lookup_count(), 3);
    }

    #[tokio::test]
    async fn misses_are_not_cached() {
        let (guild, _, role) = ids();
        let platform = Arc::new(MockPlatform::new(CallJournal::new()));
        let directory = CachedGuildDirectory::new(platform.clone());

        assert!(directory.role(&guild, &role).await.unwrap().is_none());
        assert!(directory.role(&guild, &role).await.unwrap().is_none());

        assert_eq!(platform.lookup_count(), 2);
    }

    #[tokio::test]
    async fn members_always_hit_the_platform() {
        let (guild, _, _) = ids();
        let applicant = ApplicantId::new("1").unwrap();
        let platform =
            Arc::new(MockPlatform::new(CallJournal::new()).with_member(&guild, applicant.clone()));
        let directory = CachedGuildDirectory::new(platform.clone());

        directory.member(&guild, &applicant).await.unwrap();
        directory.member(&guild, &applicant).await.unwrap();

        assert_eq!(platform.lookup_count(), 2);
    }
}
