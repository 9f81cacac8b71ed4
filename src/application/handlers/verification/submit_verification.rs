//! SubmitVerificationHandler - the submission pipeline.
//!
//! Runs in two halves around the provisional acknowledgement:
//!
//! 1. [`accept`](SubmitVerificationHandler::accept) runs inline with the
//!    interaction request. It checks the origin guild, recovers the session
//!    token from the form id and claims the applicant's session. Stale or
//!    duplicate submissions stop here.
//! 2. [`handle`](SubmitVerificationHandler::handle) runs on its own task
//!    after the acknowledgement: age → decision → audit → action → reply.
//!
//! Ordering per outcome:
//!
//! | Outcome | Steps |
//! |---------|-------|
//! | Invalid | reply |
//! | Pass | audit, grant role, reply |
//! | Fail | audit, reply, remove |
//!
//! The underage reply goes out before the removal because a removed
//! applicant can no longer see it.

use std::sync::Arc;

use crate::application::context::GateSettings;
use crate::application::fatal::FatalSignal;
use crate::domain::foundation::{GuildId, Timestamp};
use crate::domain::verification::{
    calculate_age, session_token_from_custom_id, Applicant, Decision, GuildMember, Outcome,
    ReplyHandle, Submission, SupplementaryAnswer, VerificationError, BIRTHDATE_FIELD_ID,
};
use crate::ports::{InteractionResponder, SessionGuard};

use super::action_executor::{ActionExecutor, ActionTaken};
use super::audit_logger::{AuditDelivery, AuditLogger};
use super::replies;

/// A submitted form, as received from the platform.
#[derive(Debug, Clone)]
pub struct SubmitVerificationCommand {
    pub applicant: Applicant,
    pub guild_id: Option<GuildId>,
    pub form_custom_id: String,
    /// `(field id, value)` pairs in form order.
    pub values: Vec<(String, String)>,
    /// Membership snapshot delivered with the interaction.
    pub member: Option<GuildMember>,
    pub reply: ReplyHandle,
    pub submitted_at: Timestamp,
}

impl SubmitVerificationCommand {
    fn value(&self, field_id: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(id, _)| id == field_id)
            .map(|(_, value)| value.as_str())
    }
}

/// Result of one processed submission.
#[derive(Debug, Clone)]
pub struct VerificationResult {
    pub decision: Decision,
    pub audit: AuditDelivery,
    pub action: ActionTaken,
}

pub struct SubmitVerificationHandler {
    settings: Arc<GateSettings>,
    sessions: Arc<dyn SessionGuard>,
    audit: AuditLogger,
    executor: ActionExecutor,
    responder: Arc<dyn InteractionResponder>,
    fatal: FatalSignal,
}

impl SubmitVerificationHandler {
    pub fn new(
        settings: Arc<GateSettings>,
        sessions: Arc<dyn SessionGuard>,
        audit: AuditLogger,
        executor: ActionExecutor,
        responder: Arc<dyn InteractionResponder>,
        fatal: FatalSignal,
    ) -> Self {
        Self {
            settings,
            sessions,
            audit,
            executor,
            responder,
            fatal,
        }
    }

    /// Validates the submission and claims its session. On success the
    /// caller owns the claim and must pass the submission to `handle`.
    pub async fn accept(
        &self,
        cmd: SubmitVerificationCommand,
    ) -> Result<Submission, VerificationError> {
        if cmd.guild_id.as_ref() != Some(&self.settings.guild_id) {
            return Err(VerificationError::WrongGuild);
        }

        let token = session_token_from_custom_id(&cmd.form_custom_id)
            .ok_or(VerificationError::StaleSubmission)?;

        let session = self
            .sessions
            .claim(&cmd.applicant.id, &token, cmd.submitted_at)
            .await
            .map_err(|e| {
                tracing::info!(applicant_id = %cmd.applicant.id, error = %e, "Submission rejected");
                e
            })?;

        let birthdate_raw = cmd.value(BIRTHDATE_FIELD_ID).unwrap_or_default().to_string();
        let answers = self
            .settings
            .supplementary_fields
            .iter()
            .filter_map(|field| {
                let value = cmd.value(&field.id)?.trim();
                (!value.is_empty()).then(|| SupplementaryAnswer {
                    field_id: field.id.clone(),
                    label: field.label.clone(),
                    value: value.to_string(),
                })
            })
            .collect();

        Ok(Submission {
            session,
            applicant: cmd.applicant,
            member: cmd.member,
            birthdate_raw,
            answers,
            reply: cmd.reply,
            submitted_at: cmd.submitted_at,
        })
    }

    /// Task entry point. Never fails: the applicant has been answered by the
    /// time `process` returns, and configuration errors are raised to the
    /// fatal channel.
    pub async fn handle(&self, submission: Submission) {
        let applicant_id = submission.applicant.id.clone();

        if let Err(e) = self.process(submission).await {
            tracing::warn!(applicant_id = %applicant_id, error = %e, "Verification failed");
            if e.is_fatal() {
                self.fatal.raise(e);
            }
        }
    }

    /// Runs the pipeline and releases the applicant's session afterwards,
    /// whatever the outcome. The reply is finalized exactly once on every
    /// path, errors included.
    pub async fn process(
        &self,
        submission: Submission,
    ) -> Result<VerificationResult, VerificationError> {
        let result = self.run(&submission).await;
        self.sessions.release(&submission.applicant.id).await;
        result
    }

    async fn run(&self, submission: &Submission) -> Result<VerificationResult, VerificationError> {
        let applicant = &submission.applicant;
        let raw = submission.birthdate_raw.as_str();

        let age = calculate_age(
            raw,
            *submission.submitted_at.as_datetime(),
            self.settings.date_policy,
        );
        let decision = self.settings.decision_engine().decide(age, raw);

        tracing::info!(
            applicant_id = %applicant.id,
            outcome = %decision.outcome(),
            age = decision.whole_years(),
            "Verification decided"
        );

        match decision.outcome() {
            Outcome::Invalid => {
                let text = replies::invalid_format(raw, self.settings.date_policy);
                self.finalize(&submission.reply, &text).await;
                Ok(VerificationResult {
                    decision,
                    audit: AuditDelivery::Skipped,
                    action: ActionTaken::None,
                })
            }
            Outcome::Pass => {
                let audit = self.audit(submission, &decision).await;
                let action = match self
                    .executor
                    .execute(&decision, &applicant.id, submission.member.as_ref())
                    .await
                {
                    Ok(action) => action,
                    Err(e) => {
                        self.finalize(&submission.reply, replies::UNEXPECTED_FAILURE)
                            .await;
                        return Err(e);
                    }
                };
                self.finalize(&submission.reply, replies::VERIFIED).await;
                Ok(VerificationResult {
                    decision,
                    audit,
                    action,
                })
            }
            Outcome::Fail => {
                let audit = self.audit(submission, &decision).await;
                self.finalize(&submission.reply, replies::UNDERAGE).await;
                let action = self
                    .executor
                    .execute(&decision, &applicant.id, submission.member.as_ref())
                    .await?;
                Ok(VerificationResult {
                    decision,
                    audit,
                    action,
                })
            }
        }
    }

    async fn audit(&self, submission: &Submission, decision: &Decision) -> AuditDelivery {
        self.audit
            .record(
                &submission.applicant,
                decision,
                &submission.answers,
                submission.submitted_at,
            )
            .await
    }

    /// Reply failures are logged; the decision already stands.
    async fn finalize(&self, reply: &ReplyHandle, content: &str) {
        if let Err(e) = self.responder.finalize(reply, content).await {
            tracing::warn!(error = %e, "Failed to finalize reply");
        }
    }
}
