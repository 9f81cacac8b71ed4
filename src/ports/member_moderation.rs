//! MemberModeration port - the platform-visible consequences of a decision.

use async_trait::async_trait;

use crate::domain::foundation::{ApplicantId, GuildId, RoleId};

use super::PlatformError;

/// Port for mutating an applicant's membership.
///
/// Every call is a single attempt; implementations must not retry.
#[async_trait]
pub trait MemberModeration: Send + Sync {
    /// Adds `role` to the applicant.
    async fn grant_role(
        &self,
        guild: &GuildId,
        applicant: &ApplicantId,
        role: &RoleId,
        reason: &str,
    ) -> Result<(), PlatformError>;

    /// Bans the applicant from the guild.
    async fn ban(
        &self,
        guild: &GuildId,
        applicant: &ApplicantId,
        reason: &str,
    ) -> Result<(), PlatformError>;

    /// Removes the applicant from the guild without a ban.
    async fn kick(
        &self,
        guild: &GuildId,
        applicant: &ApplicantId,
        reason: &str,
    ) -> Result<(), PlatformError>;
}
