//! In-memory chat platform for testing.
//!
//! Implements `GuildDirectory`, `MemberModeration`, `ChannelMessenger` and
//! `InteractionResponder` against in-memory state. Side effects go to a
//! [`CallJournal`] that can be shared with other doubles.
//!
//! # Example
//!
//! ```ignore
//! let journal = CallJournal::new();
//! let platform = MockPlatform::new(journal.clone())
//!     .with_guild(guild.clone())
//!     .with_channel(&guild, channel)
//!     .with_role(&guild, role)
//!     .failing(MockOperation::Ban);
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::adapters::journal::{CallJournal, RecordedCall};
use crate::domain::foundation::{ApplicantId, ChannelId, GuildId, MessageId, RoleId};
use crate::domain::verification::{
    Announcement, Channel, ChannelMessage, Guild, GuildMember, ReplyHandle, Role,
};
use crate::ports::{
    ChannelMessenger, GuildDirectory, InteractionResponder, MemberModeration, PlatformError,
};

/// Operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    Lookup,
    GrantRole,
    Ban,
    Kick,
    RecentMessages,
    PostAnnouncement,
    Finalize,
}

#[derive(Debug, Default)]
struct PlatformState {
    guilds: HashMap<GuildId, Guild>,
    channels: HashMap<ChannelId, Channel>,
    roles: HashMap<(GuildId, RoleId), Role>,
    members: HashMap<(GuildId, ApplicantId), GuildMember>,
    messages: HashMap<ChannelId, Vec<ChannelMessage>>,
    failing: HashSet<MockOperation>,
}

/// In-memory platform double.
#[derive(Debug)]
pub struct MockPlatform {
    journal: CallJournal,
    application_id: String,
    state: RwLock<PlatformState>,
    lookups: AtomicUsize,
    next_message_id: AtomicUsize,
}

impl MockPlatform {
    pub const APPLICATION_ID: &'static str = "1100000000000000000";

    pub fn new(journal: CallJournal) -> Self {
        Self {
            journal,
            application_id: Self::APPLICATION_ID.to_string(),
            state: RwLock::new(PlatformState::default()),
            lookups: AtomicUsize::new(0),
            next_message_id: AtomicUsize::new(1),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, PlatformState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, PlatformState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn with_guild(self, id: GuildId) -> Self {
        let guild = Guild {
            id: id.clone(),
            name: format!("guild {}", id),
        };
        self.write().guilds.insert(id, guild);
        self
    }

    pub fn with_channel(self, guild: &GuildId, id: ChannelId) -> Self {
        let channel = Channel {
            id: id.clone(),
            guild_id: Some(guild.clone()),
            name: Some("verification".to_string()),
        };
        self.write().channels.insert(id, channel);
        self
    }

    pub fn with_role(self, guild: &GuildId, id: RoleId) -> Self {
        let role = Role {
            id: id.clone(),
            name: "Verified".to_string(),
        };
        self.write().roles.insert((guild.clone(), id), role);
        self
    }

    pub fn with_member(self, guild: &GuildId, applicant: ApplicantId) -> Self {
        let member = GuildMember {
            applicant_id: applicant.clone(),
            role_ids: Vec::new(),
        };
        self.write().members.insert((guild.clone(), applicant), member);
        self
    }

    pub fn with_message(self, channel: &ChannelId, message: ChannelMessage) -> Self {
        self.write()
            .messages
            .entry(channel.clone())
            .or_default()
            .insert(0, message);
        self
    }

    pub fn failing(self, operation: MockOperation) -> Self {
        self.set_failing(operation, true);
        self
    }

    /// Toggles a failure at runtime.
    pub fn set_failing(&self, operation: MockOperation, failing: bool) {
        let mut state = self.write();
        if failing {
            state.failing.insert(operation);
        } else {
            state.failing.remove(&operation);
        }
    }

    pub fn remove_role(&self, guild: &GuildId, id: &RoleId) {
        self.write().roles.remove(&(guild.clone(), id.clone()));
    }

    /// Number of directory lookups served.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn messages_in(&self, channel: &ChannelId) -> Vec<ChannelMessage> {
        self.read().messages.get(channel).cloned().unwrap_or_default()
    }

    pub fn member_roles(&self, guild: &GuildId, applicant: &ApplicantId) -> Vec<RoleId> {
        self.read()
            .members
            .get(&(guild.clone(), applicant.clone()))
            .map(|m| m.role_ids.clone())
            .unwrap_or_default()
    }

    fn check(&self, operation: MockOperation) -> Result<(), PlatformError> {
        if self.read().failing.contains(&operation) {
            return Err(PlatformError::network(format!(
                "simulated {:?} failure",
                operation
            )));
        }
        Ok(())
    }

    fn lookup(&self) -> Result<(), PlatformError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check(MockOperation::Lookup)
    }
}

#[async_trait]
impl GuildDirectory for MockPlatform {
    async fn guild(&self, id: &GuildId) -> Result<Option<Guild>, PlatformError> {
        self.lookup()?;
        Ok(self.read().guilds.get(id).cloned())
    }

    async fn channel(
        &self,
        guild: &GuildId,
        id: &ChannelId,
    ) -> Result<Option<Channel>, PlatformError> {
        self.lookup()?;
        Ok(self
            .read()
            .channels
            .get(id)
            .filter(|c| c.guild_id.as_ref() == Some(guild))
            .cloned())
    }

    async fn role(&self, guild: &GuildId, id: &RoleId) -> Result<Option<Role>, PlatformError> {
        self.lookup()?;
        Ok(self.read().roles.get(&(guild.clone(), id.clone())).cloned())
    }

    async fn member(
        &self,
        guild: &GuildId,
        applicant: &ApplicantId,
    ) -> Result<Option<GuildMember>, PlatformError> {
        self.lookup()?;
        Ok(self
            .read()
            .members
            .get(&(guild.clone(), applicant.clone()))
            .cloned())
    }
}

#[async_trait]
impl MemberModeration for MockPlatform {
    async fn grant_role(
        &self,
        guild: &GuildId,
        applicant: &ApplicantId,
        role: &RoleId,
        reason: &str,
    ) -> Result<(), PlatformError> {
        self.check(MockOperation::GrantRole)?;
        if let Some(member) = self
            .write()
            .members
            .get_mut(&(guild.clone(), applicant.clone()))
        {
            if !member.has_role(role) {
                member.role_ids.push(role.clone());
            }
        }
        self.journal.record(RecordedCall::GrantRole {
            applicant: applicant.clone(),
            role: role.clone(),
            reason: reason.to_string(),
        });
        Ok(())
    }

    async fn ban(
        &self,
        guild: &GuildId,
        applicant: &ApplicantId,
        reason: &str,
    ) -> Result<(), PlatformError> {
        self.check(MockOperation::Ban)?;
        self.write()
            .members
            .remove(&(guild.clone(), applicant.clone()));
        self.journal.record(RecordedCall::Ban {
            applicant: applicant.clone(),
            reason: reason.to_string(),
        });
        Ok(())
    }

    async fn kick(
        &self,
        guild: &GuildId,
        applicant: &ApplicantId,
        reason: &str,
    ) -> Result<(), PlatformError> {
        self.check(MockOperation::Kick)?;
        self.write()
            .members
            .remove(&(guild.clone(), applicant.clone()));
        self.journal.record(RecordedCall::Kick {
            applicant: applicant.clone(),
            reason: reason.to_string(),
        });
        Ok(())
    }
}

#[async_trait]
impl ChannelMessenger for MockPlatform {
    async fn recent_messages(
        &self,
        channel: &ChannelId,
        limit: u8,
    ) -> Result<Vec<ChannelMessage>, PlatformError> {
        self.check(MockOperation::RecentMessages)?;
        Ok(self
            .read()
            .messages
            .get(channel)
            .map(|m| m.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn post_announcement(
        &self,
        channel: &ChannelId,
        announcement: &Announcement,
    ) -> Result<MessageId, PlatformError> {
        self.check(MockOperation::PostAnnouncement)?;

        let n = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        let id = MessageId::new(format!("{}", 9_000_000 + n))
            .map_err(|e| PlatformError::decode(e.to_string()))?;
        let message = ChannelMessage {
            id: id.clone(),
            author_id: self.application_id.clone(),
            control_ids: vec![announcement.trigger_id().to_string()],
        };
        self.write()
            .messages
            .entry(channel.clone())
            .or_default()
            .insert(0, message);

        self.journal.record(RecordedCall::PostAnnouncement {
            channel: channel.clone(),
        });
        Ok(id)
    }
}

#[async_trait]
impl InteractionResponder for MockPlatform {
    async fn finalize(&self, _reply: &ReplyHandle, content: &str) -> Result<(), PlatformError> {
        self.check(MockOperation::Finalize)?;
        self.journal.record(RecordedCall::Finalize {
            content: content.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guild() -> GuildId {
        GuildId::new("100").unwrap()
    }

    #[tokio::test]
    async fn channel_in_other_guild_is_not_found() {
        let channel = ChannelId::new("200").unwrap();
        let platform = MockPlatform::new(CallJournal::new())
            .with_channel(&GuildId::new("999").unwrap(), channel.clone());

        assert!(platform.channel(&guild(), &channel).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn grant_role_updates_member_and_journal() {
        let journal = CallJournal::new();
        let applicant = ApplicantId::new("1").unwrap();
        let role = RoleId::new("300").unwrap();
        let platform = MockPlatform::new(journal.clone()).with_member(&guild(), applicant.clone());

        platform
            .grant_role(&guild(), &applicant, &role, "ok")
            .await
            .unwrap();

        assert_eq!(platform.member_roles(&guild(), &applicant), vec![role]);
        assert_eq!(journal.kinds(), vec!["grant_role"]);
    }

    #[tokio::test]
    async fn failing_operation_records_nothing() {
        let journal = CallJournal::new();
        let platform = MockPlatform::new(journal.clone()).failing(MockOperation::Ban);

        let result = platform
            .ban(&guild(), &ApplicantId::new("1").unwrap(), "underage")
            .await;

        assert!(matches!(result, Err(PlatformError::Network(_))));
        assert!(journal.is_empty());
    }

    #[tokio::test]
    async fn posted_announcement_is_listed_newest_first() {
        let channel = ChannelId::new("200").unwrap();
        let platform = MockPlatform::new(CallJournal::new());

        let id = platform
            .post_announcement(&channel, &Announcement::default())
            .await
            .unwrap();

        let messages = platform.recent_messages(&channel, 50).await.unwrap();
        assert_eq!(messages[0].id, id);
        assert_eq!(messages[0].author_id, MockPlatform::APPLICATION_ID);
    }
}
