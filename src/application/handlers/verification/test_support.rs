//! Shared fixture for verification handler tests.

use std::sync::Arc;

use crate::adapters::audit::RecordingAuditSink;
use crate::adapters::discord::MockPlatform;
use crate::adapters::journal::CallJournal;
use crate::adapters::session::InMemorySessionGuard;
use crate::application::context::{GateSettings, VerificationContext};
use crate::application::fatal::{FatalListener, FatalSignal};
use crate::config::UnderageAction;
use crate::domain::foundation::{ApplicantId, ChannelId, GuildId, RoleId};
use crate::domain::verification::{
    Announcement, Applicant, DateInputPolicy, FieldStyle, FormField, DEFAULT_MINIMUM_AGE,
};

pub fn guild_id() -> GuildId {
    GuildId::new("100").unwrap()
}

pub fn channel_id() -> ChannelId {
    ChannelId::new("200").unwrap()
}

pub fn role_id() -> RoleId {
    RoleId::new("300").unwrap()
}

pub fn applicant_id() -> ApplicantId {
    ApplicantId::new("4242").unwrap()
}

pub fn applicant() -> Applicant {
    Applicant {
        id: applicant_id(),
        tag: "applicant".to_string(),
        avatar_url: "https://cdn.discordapp.com/embed/avatars/0.png".to_string(),
    }
}

pub fn settings() -> GateSettings {
    GateSettings {
        guild_id: guild_id(),
        channel_id: channel_id(),
        role_id: role_id(),
        application_id: MockPlatform::APPLICATION_ID.to_string(),
        minimum_age: DEFAULT_MINIMUM_AGE,
        date_policy: DateInputPolicy::Strict,
        underage_action: UnderageAction::Ban,
        form_title: "Age Verification".to_string(),
        supplementary_fields: vec![FormField {
            id: "how-find".to_string(),
            label: "How did you find our server?".to_string(),
            style: FieldStyle::Paragraph,
            required: true,
            min_length: None,
            max_length: Some(1024),
        }],
        announcement: Announcement::default(),
    }
}

/// A fully wired context over in-memory doubles.
pub struct Fixture {
    pub journal: CallJournal,
    pub platform: Arc<MockPlatform>,
    pub audit: Arc<RecordingAuditSink>,
    pub sessions: Arc<InMemorySessionGuard>,
    pub listener: FatalListener,
    pub context: VerificationContext,
}

impl Fixture {
    /// Guild, channel, role and the applicant's membership all resolve.
    pub fn new() -> Self {
        Self::build(settings(), |platform| platform)
    }

    /// Home resources present; `configure` may add failures or state.
    pub fn build(
        settings: GateSettings,
        configure: impl FnOnce(MockPlatform) -> MockPlatform,
    ) -> Self {
        Self::assemble(settings, true, configure, |sink| sink)
    }

    /// Nothing resolves unless `configure` adds it.
    pub fn bare(configure: impl FnOnce(MockPlatform) -> MockPlatform) -> Self {
        Self::assemble(settings(), false, configure, |sink| sink)
    }

    pub fn with_audit(configure_audit: impl FnOnce(RecordingAuditSink) -> RecordingAuditSink) -> Self {
        Self::assemble(settings(), true, |platform| platform, configure_audit)
    }

    fn assemble(
        settings: GateSettings,
        populated: bool,
        configure: impl FnOnce(MockPlatform) -> MockPlatform,
        configure_audit: impl FnOnce(RecordingAuditSink) -> RecordingAuditSink,
    ) -> Self {
        let journal = CallJournal::new();
        let mut platform = MockPlatform::new(journal.clone());
        if populated {
            platform = platform
                .with_guild(guild_id())
                .with_channel(&guild_id(), channel_id())
                .with_role(&guild_id(), role_id())
                .with_member(&guild_id(), applicant_id());
        }
        let platform = Arc::new(configure(platform));
        let audit = Arc::new(configure_audit(RecordingAuditSink::new(journal.clone())));
        let sessions = Arc::new(InMemorySessionGuard::new(900));
        let (fatal, listener) = FatalSignal::channel();

        let context = VerificationContext {
            settings: Arc::new(settings),
            directory: platform.clone(),
            moderation: platform.clone(),
            messenger: platform.clone(),
            responder: platform.clone(),
            audit_sink: audit.clone(),
            sessions: sessions.clone(),
            fatal,
        };

        Self {
            journal,
            platform,
            audit,
            sessions,
            listener,
            context,
        }
    }
}
