//! Verification error types.
//!
//! | Error | Scope |
//! |-------|-------|
//! | Configuration | fatal, stops the process |
//! | StaleSubmission | one submission, applicant may retrigger |
//! | InProgress | one trigger, applicant waits for the running submission |
//! | WrongGuild | one interaction |
//! | Platform | one submission |

use thiserror::Error;

use crate::domain::foundation::{ApplicantId, ChannelId, GuildId, RoleId};

/// A configured resource that the platform could not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnresolvedResource {
    #[error("home guild missing ({0})")]
    Guild(GuildId),

    #[error("home channel missing ({0})")]
    Channel(ChannelId),

    #[error("home role missing ({0})")]
    Role(RoleId),

    #[error("applicant {applicant} is not a member of guild {guild}")]
    Member { guild: GuildId, applicant: ApplicantId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The deployment is misconfigured; continuing would silently skip actions.
    #[error("configuration error: {0}")]
    Configuration(#[from] UnresolvedResource),

    #[error("verification form is stale or was already submitted")]
    StaleSubmission,

    #[error("a verification is already in progress for applicant {0}")]
    InProgress(ApplicantId),

    #[error("interaction did not come from the gated guild")]
    WrongGuild,

    #[error("platform call failed: {0}")]
    Platform(String),
}

impl VerificationError {
    pub fn platform(message: impl Into<String>) -> Self {
        VerificationError::Platform(message.into())
    }

    /// Whether this error must stop the whole process.
    pub fn is_fatal(&self) -> bool {
        matches!(self, VerificationError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_configuration_errors_are_fatal() {
        let fatal: VerificationError =
            UnresolvedResource::Role(RoleId::new("7").unwrap()).into();
        assert!(fatal.is_fatal());
        assert!(!VerificationError::StaleSubmission.is_fatal());
        assert!(!VerificationError::platform("timeout").is_fatal());
    }

    #[test]
    fn diagnostics_name_the_missing_resource() {
        let err = VerificationError::from(UnresolvedResource::Channel(ChannelId::new("42").unwrap()));
        assert_eq!(err.to_string(), "configuration error: home channel missing (42)");
    }
}
