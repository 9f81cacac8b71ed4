//! ChannelMessenger port - reading and posting channel messages.

use async_trait::async_trait;

use crate::domain::foundation::{ChannelId, MessageId};
use crate::domain::verification::{Announcement, ChannelMessage};

use super::PlatformError;

#[async_trait]
pub trait ChannelMessenger: Send + Sync {
    /// The most recent messages in the channel, newest first.
    async fn recent_messages(
        &self,
        channel: &ChannelId,
        limit: u8,
    ) -> Result<Vec<ChannelMessage>, PlatformError>;

    /// Posts the call-to-action and returns the new message's id.
    async fn post_announcement(
        &self,
        channel: &ChannelId,
        announcement: &Announcement,
    ) -> Result<MessageId, PlatformError>;
}
