//! EnsureAnnouncementHandler - posts the call-to-action once.
//!
//! Idempotent across restarts: the recent history of the announcement
//! channel is inspected first, and an existing message from this bot that
//! carries the trigger control suppresses a repost.

use std::sync::Arc;

use crate::application::context::GateSettings;
use crate::domain::foundation::MessageId;
use crate::domain::verification::VerificationError;
use crate::ports::ChannelMessenger;

/// How far back the channel history is searched.
pub const ANNOUNCEMENT_LOOKBACK: u8 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnouncementStatus {
    AlreadyPresent(MessageId),
    Posted(MessageId),
}

pub struct EnsureAnnouncementHandler {
    messenger: Arc<dyn ChannelMessenger>,
    settings: Arc<GateSettings>,
}

impl EnsureAnnouncementHandler {
    pub fn new(messenger: Arc<dyn ChannelMessenger>, settings: Arc<GateSettings>) -> Self {
        Self {
            messenger,
            settings,
        }
    }

    pub async fn handle(&self) -> Result<AnnouncementStatus, VerificationError> {
        let channel = &self.settings.channel_id;
        let announcement = &self.settings.announcement;

        let recent = self
            .messenger
            .recent_messages(channel, ANNOUNCEMENT_LOOKBACK)
            .await
            .map_err(|e| VerificationError::platform(e.to_string()))?;

        let existing = recent.into_iter().find(|m| {
            m.author_id == self.settings.application_id && m.has_control(announcement.trigger_id())
        });

        if let Some(message) = existing {
            tracing::info!(
                channel_id = %channel,
                message_id = %message.id,
                "Announcement already present"
            );
            return Ok(AnnouncementStatus::AlreadyPresent(message.id));
        }

        let id = self
            .messenger
            .post_announcement(channel, announcement)
            .await
            .map_err(|e| VerificationError::platform(e.to_string()))?;

        tracing::info!(channel_id = %channel, message_id = %id, "Announcement posted");
        Ok(AnnouncementStatus::Posted(id))
    }
}
