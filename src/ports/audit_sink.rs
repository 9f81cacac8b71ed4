//! AuditSink port - one-way delivery of audit records.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::verification::AuditEvent;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    #[error("audit sink unreachable: {0}")]
    Unreachable(String),

    #[error("audit sink rejected the event with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Port for the external, independently-owned audit sink.
///
/// Delivery is fire-and-forget: one attempt, no retry, no local persistence.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn deliver(&self, event: &AuditEvent) -> Result<(), AuditError>;
}
