//! IssuePromptHandler - reacts to the trigger by opening a session and
//! building the form scoped to it.

use std::sync::Arc;

use crate::application::context::GateSettings;
use crate::domain::foundation::{ApplicantId, GuildId, Timestamp};
use crate::domain::verification::{VerificationError, VerificationForm, VerificationSession};
use crate::ports::SessionGuard;

/// Command issued when an applicant activates the trigger.
#[derive(Debug, Clone)]
pub struct IssuePromptCommand {
    pub applicant_id: ApplicantId,
    /// `None` when the trigger arrived outside any guild.
    pub guild_id: Option<GuildId>,
    pub requested_at: Timestamp,
}

pub struct IssuePromptHandler {
    sessions: Arc<dyn SessionGuard>,
    settings: Arc<GateSettings>,
}

impl IssuePromptHandler {
    pub fn new(sessions: Arc<dyn SessionGuard>, settings: Arc<GateSettings>) -> Self {
        Self { sessions, settings }
    }

    pub async fn handle(&self, cmd: IssuePromptCommand) -> Result<VerificationForm, VerificationError> {
        if cmd.guild_id.as_ref() != Some(&self.settings.guild_id) {
            tracing::debug!(applicant_id = %cmd.applicant_id, "Trigger from outside the gated guild");
            return Err(VerificationError::WrongGuild);
        }

        let session = VerificationSession::open(
            cmd.applicant_id.clone(),
            self.settings.guild_id.clone(),
            cmd.requested_at,
        );
        let token = *session.token();
        self.sessions.open(session).await?;

        tracing::info!(applicant_id = %cmd.applicant_id, "Verification form issued");

        Ok(VerificationForm::for_session(
            &token,
            self.settings.form_title.clone(),
            self.settings.date_policy,
            &self.settings.supplementary_fields,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::verification::test_support::{
        applicant_id, guild_id, Fixture,
    };
    use crate::domain::verification::{session_token_from_custom_id, BIRTHDATE_FIELD_ID};

    fn command() -> IssuePromptCommand {
        IssuePromptCommand {
            applicant_id: applicant_id(),
            guild_id: Some(guild_id()),
            requested_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn form_is_bound_to_a_claimable_session() {
        let fixture = Fixture::new();

        let form = fixture.context.issue_prompt().handle(command()).await.unwrap();

        assert_eq!(form.fields[0].id, BIRTHDATE_FIELD_ID);
        assert_eq!(form.fields[1].id, "how-find");
        let token = session_token_from_custom_id(&form.custom_id).unwrap();
        assert!(fixture
            .sessions
            .claim(&applicant_id(), &token, Timestamp::now())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn concurrent_applicants_get_distinct_forms() {
        let fixture = Fixture::new();
        let handler = fixture.context.issue_prompt();
        let other = ApplicantId::new("5151").unwrap();

        let a = handler.handle(command()).await.unwrap();
        let b = handler
            .handle(IssuePromptCommand {
                applicant_id: other,
                ..command()
            })
            .await
            .unwrap();

        assert_ne!(a.custom_id, b.custom_id);
        assert_eq!(fixture.sessions.len().await, 2);
    }

    #[tokio::test]
    async fn trigger_from_other_guild_is_refused() {
        let fixture = Fixture::new();

        let result = fixture
            .context
            .issue_prompt()
            .handle(IssuePromptCommand {
                guild_id: Some(GuildId::new("999").unwrap()),
                ..command()
            })
            .await;

        assert_eq!(result, Err(VerificationError::WrongGuild));
        assert!(fixture.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn trigger_outside_any_guild_is_refused() {
        let fixture = Fixture::new();

        let result = fixture
            .context
            .issue_prompt()
            .handle(IssuePromptCommand {
                guild_id: None,
                ..command()
            })
            .await;

        assert_eq!(result, Err(VerificationError::WrongGuild));
    }
}
