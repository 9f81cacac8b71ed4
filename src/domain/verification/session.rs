//! Verification sessions and the submissions that consume them.

use chrono::Duration;

use crate::domain::foundation::{ApplicantId, GuildId, SessionToken, Timestamp};

use super::resources::GuildMember;

/// The applicant as presented by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applicant {
    pub id: ApplicantId,
    /// Display identity used in audit records (the platform "tag").
    pub tag: String,
    pub avatar_url: String,
}

/// One prompt-to-submission round trip for one applicant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationSession {
    token: SessionToken,
    applicant_id: ApplicantId,
    guild_id: GuildId,
    created_at: Timestamp,
}

impl VerificationSession {
    /// Opens a session with a fresh token.
    pub fn open(applicant_id: ApplicantId, guild_id: GuildId, created_at: Timestamp) -> Self {
        Self {
            token: SessionToken::new(),
            applicant_id,
            guild_id,
            created_at,
        }
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    pub fn applicant_id(&self) -> &ApplicantId {
        &self.applicant_id
    }

    pub fn guild_id(&self) -> &GuildId {
        &self.guild_id
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Whether the platform's interaction lifetime has passed.
    pub fn is_expired(&self, now: &Timestamp, ttl: Duration) -> bool {
        now.duration_since(&self.created_at) > ttl
    }
}

/// Opaque handle used to finalize the applicant's provisional reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyHandle(String);

impl ReplyHandle {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An answer to one of the configured supplementary form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplementaryAnswer {
    pub field_id: String,
    pub label: String,
    pub value: String,
}

/// A claimed form submission, ready for the pipeline.
///
/// Created only once the session guard has accepted it, so holding a
/// `Submission` means this applicant has no other submission in flight.
#[derive(Debug, Clone)]
pub struct Submission {
    pub session: VerificationSession,
    pub applicant: Applicant,
    /// Membership snapshot delivered with the event, if the platform sent one.
    pub member: Option<GuildMember>,
    pub birthdate_raw: String,
    pub answers: Vec<SupplementaryAnswer>,
    pub reply: ReplyHandle,
    pub submitted_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_at(secs_offset: u64) -> (VerificationSession, Timestamp) {
        let created = Timestamp::now();
        let session = VerificationSession::open(
            ApplicantId::new("1").unwrap(),
            GuildId::new("2").unwrap(),
            created,
        );
        (session, created.plus_secs(secs_offset))
    }

    #[test]
    fn fresh_session_is_not_expired() {
        let (session, now) = session_at(60);
        assert!(!session.is_expired(&now, Duration::seconds(900)));
    }

    #[test]
    fn session_expires_after_ttl() {
        let (session, now) = session_at(901);
        assert!(session.is_expired(&now, Duration::seconds(900)));
    }

    #[test]
    fn each_session_gets_its_own_token() {
        let (a, _) = session_at(0);
        let (b, _) = session_at(0);
        assert_ne!(a.token(), b.token());
    }
}
