//! Verification command and query handlers.

mod action_executor;
mod audit_logger;
mod ensure_announcement;
mod issue_prompt;
pub mod replies;
mod resolve_home;
mod submit_verification;

#[cfg(test)]
pub(crate) mod test_support;

pub use action_executor::{removal_reason, ActionExecutor, ActionTaken, GRANT_REASON};
pub use audit_logger::{AuditDelivery, AuditLogger};
pub use ensure_announcement::{AnnouncementStatus, EnsureAnnouncementHandler, ANNOUNCEMENT_LOOKBACK};
pub use issue_prompt::{IssuePromptCommand, IssuePromptHandler};
pub use resolve_home::{HomeResources, ResolveHomeHandler, ResolveHomeQuery};
pub use submit_verification::{
    SubmitVerificationCommand, SubmitVerificationHandler, VerificationResult,
};
