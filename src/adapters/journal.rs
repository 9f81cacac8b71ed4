//! Shared, ordered record of side effects performed by the test doubles.
//!
//! The platform double and the audit double write into the same journal, so
//! tests can assert the relative order of audit, moderation and reply calls.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::foundation::{ApplicantId, ChannelId, RoleId};
use crate::domain::verification::Outcome;

/// One side effect observed by a double.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Audit {
        applicant: ApplicantId,
        outcome: Outcome,
    },
    GrantRole {
        applicant: ApplicantId,
        role: RoleId,
        reason: String,
    },
    Ban {
        applicant: ApplicantId,
        reason: String,
    },
    Kick {
        applicant: ApplicantId,
        reason: String,
    },
    Finalize {
        content: String,
    },
    PostAnnouncement {
        channel: ChannelId,
    },
}

impl RecordedCall {
    /// Short label for ordering assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            RecordedCall::Audit { .. } => "audit",
            RecordedCall::GrantRole { .. } => "grant_role",
            RecordedCall::Ban { .. } => "ban",
            RecordedCall::Kick { .. } => "kick",
            RecordedCall::Finalize { .. } => "finalize",
            RecordedCall::PostAnnouncement { .. } => "post_announcement",
        }
    }
}

/// Cheaply cloneable handle to one shared journal.
#[derive(Debug, Clone, Default)]
pub struct CallJournal {
    entries: Arc<Mutex<Vec<RecordedCall>>>,
}

impl CallJournal {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record(&self, call: RecordedCall) {
        self.lock().push(call);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().clone()
    }

    /// Kinds of every recorded call, oldest first.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.lock().iter().map(RecordedCall::kind).collect()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.lock().iter().filter(|c| c.kind() == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let journal = CallJournal::new();
        let other = journal.clone();

        other.record(RecordedCall::Finalize {
            content: "hi".to_string(),
        });

        assert_eq!(journal.kinds(), vec!["finalize"]);
        assert_eq!(journal.count("finalize"), 1);
        assert!(!journal.is_empty());
    }
}
