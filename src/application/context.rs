//! Explicit service context.
//!
//! Built once in `main` from the validated configuration and the adapter
//! handles, then cloned into every request task.

use std::sync::Arc;

use crate::config::{AppConfig, UnderageAction, ValidationError};
use crate::domain::foundation::{ChannelId, GuildId, RoleId};
use crate::domain::verification::{Announcement, DateInputPolicy, DecisionEngine, FormField};
use crate::ports::{
    AuditSink, ChannelMessenger, GuildDirectory, InteractionResponder, MemberModeration,
    SessionGuard,
};

use super::fatal::FatalSignal;
use super::handlers::verification::{
    ActionExecutor, AuditLogger, EnsureAnnouncementHandler, IssuePromptHandler,
    ResolveHomeHandler, SubmitVerificationHandler,
};

/// Immutable settings the pipeline reads on every request.
#[derive(Debug, Clone)]
pub struct GateSettings {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub role_id: RoleId,
    /// Author id of messages this bot posts.
    pub application_id: String,
    pub minimum_age: f64,
    pub date_policy: DateInputPolicy,
    pub underage_action: UnderageAction,
    pub form_title: String,
    pub supplementary_fields: Vec<FormField>,
    pub announcement: Announcement,
}

impl GateSettings {
    pub fn from_config(config: &AppConfig) -> Result<Self, ValidationError> {
        Ok(Self {
            guild_id: config.guild.guild()?,
            channel_id: config.guild.channel()?,
            role_id: config.guild.role()?,
            application_id: config.discord.application_id.clone(),
            minimum_age: config.verification.minimum_age,
            date_policy: config.verification.date_policy(),
            underage_action: config.verification.underage_action,
            form_title: config.verification.form_title.clone(),
            supplementary_fields: config.verification.form_fields(),
            announcement: config.announcement.to_announcement(),
        })
    }

    pub fn decision_engine(&self) -> DecisionEngine {
        DecisionEngine::new(self.minimum_age)
    }
}

/// Every port the pipeline talks to, plus settings and the fatal channel.
#[derive(Clone)]
pub struct VerificationContext {
    pub settings: Arc<GateSettings>,
    pub directory: Arc<dyn GuildDirectory>,
    pub moderation: Arc<dyn MemberModeration>,
    pub messenger: Arc<dyn ChannelMessenger>,
    pub responder: Arc<dyn InteractionResponder>,
    pub audit_sink: Arc<dyn AuditSink>,
    pub sessions: Arc<dyn SessionGuard>,
    pub fatal: FatalSignal,
}

impl VerificationContext {
    pub fn resolve_home(&self) -> ResolveHomeHandler {
        ResolveHomeHandler::new(self.directory.clone())
    }

    pub fn ensure_announcement(&self) -> EnsureAnnouncementHandler {
        EnsureAnnouncementHandler::new(self.messenger.clone(), self.settings.clone())
    }

    pub fn issue_prompt(&self) -> IssuePromptHandler {
        IssuePromptHandler::new(self.sessions.clone(), self.settings.clone())
    }

    pub fn action_executor(&self) -> ActionExecutor {
        ActionExecutor::new(
            self.directory.clone(),
            self.moderation.clone(),
            self.settings.clone(),
        )
    }

    pub fn submit_verification(&self) -> SubmitVerificationHandler {
        SubmitVerificationHandler::new(
            self.settings.clone(),
            self.sessions.clone(),
            AuditLogger::new(self.audit_sink.clone()),
            self.action_executor(),
            self.responder.clone(),
            self.fatal.clone(),
        )
    }
}
