//! AuditLogger - best-effort delivery of one audit event per decision.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::verification::{Applicant, AuditEvent, Decision, SupplementaryAnswer};
use crate::ports::AuditSink;

/// What happened to the audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditDelivery {
    Delivered,
    /// Attempted and failed; logged, never retried.
    Failed,
    /// Invalid outcomes are not audited.
    Skipped,
}

pub struct AuditLogger {
    sink: Arc<dyn AuditSink>,
}

impl AuditLogger {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    /// Never fails: delivery problems are logged and reported in the result.
    pub async fn record(
        &self,
        applicant: &Applicant,
        decision: &Decision,
        answers: &[SupplementaryAnswer],
        occurred_at: Timestamp,
    ) -> AuditDelivery {
        let Some(event) = AuditEvent::from_decision(applicant, decision, answers, occurred_at)
        else {
            return AuditDelivery::Skipped;
        };

        match self.sink.deliver(&event).await {
            Ok(()) => AuditDelivery::Delivered,
            Err(e) => {
                tracing::warn!(
                    applicant_id = %applicant.id,
                    outcome = %decision.outcome(),
                    error = %e,
                    "Audit delivery failed, continuing"
                );
                AuditDelivery::Failed
            }
        }
    }
}
