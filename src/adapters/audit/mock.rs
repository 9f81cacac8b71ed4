//! Recording audit sink for testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::adapters::journal::{CallJournal, RecordedCall};
use crate::domain::verification::AuditEvent;
use crate::ports::{AuditError, AuditSink};

/// Keeps every delivered event and records it in the shared journal.
#[derive(Debug, Default)]
pub struct RecordingAuditSink {
    journal: CallJournal,
    events: Mutex<Vec<AuditEvent>>,
    unreachable: AtomicBool,
}

impl RecordingAuditSink {
    pub fn new(journal: CallJournal) -> Self {
        Self {
            journal,
            ..Default::default()
        }
    }

    /// Makes every delivery fail.
    pub fn unreachable(self) -> Self {
        self.unreachable.store(true, Ordering::SeqCst);
        self
    }

    pub fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl AuditSink for RecordingAuditSink {
    async fn deliver(&self, event: &AuditEvent) -> Result<(), AuditError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(AuditError::Unreachable("simulated outage".to_string()));
        }

        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
        self.journal.record(RecordedCall::Audit {
            applicant: event.applicant_id.clone(),
            outcome: event.outcome,
        });
        Ok(())
    }
}
