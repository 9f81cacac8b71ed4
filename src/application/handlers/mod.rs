//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod verification;

pub use verification::{
    ActionExecutor, ActionTaken, AnnouncementStatus, AuditDelivery, AuditLogger,
    EnsureAnnouncementHandler, HomeResources, IssuePromptCommand, IssuePromptHandler,
    ResolveHomeHandler, ResolveHomeQuery, SubmitVerificationCommand, SubmitVerificationHandler,
    VerificationResult,
};
