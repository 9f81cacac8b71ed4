//! ActionExecutor - applies the platform consequence of a decision.
//!
//! Pass grants the membership role; Fail removes the applicant (ban or kick,
//! per configuration). Guild, role and membership are resolved through the
//! directory first; any of them missing is a configuration error.

use std::sync::Arc;

use crate::application::context::GateSettings;
use crate::config::UnderageAction;
use crate::domain::foundation::ApplicantId;
use crate::domain::verification::{
    Decision, GuildMember, Outcome, UnresolvedResource, VerificationError,
};
use crate::ports::{GuildDirectory, MemberModeration, PlatformError};

pub const GRANT_REASON: &str = "Age verification passed";

/// The side effect that was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTaken {
    RoleGranted,
    /// The applicant already held the role; nothing was sent.
    RoleAlreadyHeld,
    Banned,
    Kicked,
    None,
}

/// Audit-log reason for a removal.
pub fn removal_reason(decision: &Decision) -> String {
    format!(
        "Age verification failed: {} ({} years old)",
        decision.raw_input(),
        decision.whole_years().unwrap_or_default()
    )
}

pub struct ActionExecutor {
    directory: Arc<dyn GuildDirectory>,
    moderation: Arc<dyn MemberModeration>,
    settings: Arc<GateSettings>,
}

impl ActionExecutor {
    pub fn new(
        directory: Arc<dyn GuildDirectory>,
        moderation: Arc<dyn MemberModeration>,
        settings: Arc<GateSettings>,
    ) -> Self {
        Self {
            directory,
            moderation,
            settings,
        }
    }

    /// `snapshot` is the membership delivered with the interaction, if any;
    /// without it the membership is fetched.
    pub async fn execute(
        &self,
        decision: &Decision,
        applicant: &ApplicantId,
        snapshot: Option<&GuildMember>,
    ) -> Result<ActionTaken, VerificationError> {
        if !decision.outcome().is_actionable() {
            return Ok(ActionTaken::None);
        }

        let guild = &self.settings.guild_id;
        self.directory
            .guild(guild)
            .await
            .map_err(platform)?
            .ok_or_else(|| UnresolvedResource::Guild(guild.clone()))?;

        let member = match snapshot {
            Some(member) => member.clone(),
            None => self
                .directory
                .member(guild, applicant)
                .await
                .map_err(platform)?
                .ok_or_else(|| UnresolvedResource::Member {
                    guild: guild.clone(),
                    applicant: applicant.clone(),
                })?,
        };

        match decision.outcome() {
            Outcome::Pass => self.grant(&member).await,
            Outcome::Fail => self.remove(decision, applicant).await,
            Outcome::Invalid => Ok(ActionTaken::None),
        }
    }

    async fn grant(&self, member: &GuildMember) -> Result<ActionTaken, VerificationError> {
        let guild = &self.settings.guild_id;
        let role = self
            .directory
            .role(guild, &self.settings.role_id)
            .await
            .map_err(platform)?
            .ok_or_else(|| UnresolvedResource::Role(self.settings.role_id.clone()))?;

        if member.has_role(&role.id) {
            tracing::info!(applicant_id = %member.applicant_id, "Role already held");
            return Ok(ActionTaken::RoleAlreadyHeld);
        }

        self.moderation
            .grant_role(guild, &member.applicant_id, &role.id, GRANT_REASON)
            .await
            .map_err(platform)?;

        tracing::info!(applicant_id = %member.applicant_id, role_id = %role.id, "Role granted");
        Ok(ActionTaken::RoleGranted)
    }

    async fn remove(
        &self,
        decision: &Decision,
        applicant: &ApplicantId,
    ) -> Result<ActionTaken, VerificationError> {
        let guild = &self.settings.guild_id;
        let reason = removal_reason(decision);

        let taken = match self.settings.underage_action {
            UnderageAction::Ban => {
                self.moderation
                    .ban(guild, applicant, &reason)
                    .await
                    .map_err(platform)?;
                ActionTaken::Banned
            }
            UnderageAction::Kick => {
                self.moderation
                    .kick(guild, applicant, &reason)
                    .await
                    .map_err(platform)?;
                ActionTaken::Kicked
            }
        };

        tracing::info!(applicant_id = %applicant, action = ?taken, "Underage applicant removed");
        Ok(taken)
    }
}

fn platform(e: PlatformError) -> VerificationError {
    VerificationError::platform(e.to_string())
}
