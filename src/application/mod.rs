//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers are built on demand from a [`VerificationContext`].

pub mod context;
pub mod fatal;
pub mod handlers;

pub use context::{GateSettings, VerificationContext};
pub use fatal::{FatalListener, FatalSignal};
pub use handlers::{
    ActionTaken, AnnouncementStatus, AuditDelivery, HomeResources, IssuePromptCommand,
    ResolveHomeQuery, SubmitVerificationCommand, VerificationResult,
};
