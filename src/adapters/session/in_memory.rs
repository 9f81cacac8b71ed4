//! In-memory session guard.
//!
//! Tracks one slot per applicant. Suitable for a single process; the
//! platform routes all interactions for one bot to one endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use tokio::sync::Mutex;

use crate::domain::foundation::{ApplicantId, SessionToken, Timestamp};
use crate::domain::verification::{VerificationError, VerificationSession};
use crate::ports::SessionGuard;

#[derive(Debug, Clone)]
enum Slot {
    /// Form issued, not yet submitted.
    Pending(VerificationSession),
    /// Submission claimed and being processed. Expires after the same TTL
    /// as a pending slot.
    InFlight { claimed_at: Timestamp },
}

impl Slot {
    fn is_expired(&self, now: &Timestamp, ttl: Duration) -> bool {
        match self {
            Slot::Pending(session) => session.is_expired(now, ttl),
            Slot::InFlight { claimed_at } => now.duration_since(claimed_at) > ttl,
        }
    }
}

#[derive(Debug)]
pub struct InMemorySessionGuard {
    ttl: Duration,
    slots: Arc<Mutex<HashMap<ApplicantId, Slot>>>,
}

impl InMemorySessionGuard {
    pub fn new(ttl_secs: u64) -> Self {
        let secs = i64::try_from(ttl_secs)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1000);
        Self {
            ttl: Duration::seconds(secs),
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of tracked applicants, pending or in flight.
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionGuard for InMemorySessionGuard {
    async fn open(&self, session: VerificationSession) -> Result<(), VerificationError> {
        let mut slots = self.slots.lock().await;

        let now = *session.created_at();
        let ttl = self.ttl;
        slots.retain(|_, slot| !slot.is_expired(&now, ttl));

        if let Some(Slot::InFlight { .. }) = slots.get(session.applicant_id()) {
            tracing::debug!(
                applicant_id = %session.applicant_id(),
                "Refusing new session while a submission is in flight"
            );
            return Err(VerificationError::InProgress(session.applicant_id().clone()));
        }

        slots.insert(session.applicant_id().clone(), Slot::Pending(session));
        Ok(())
    }

    async fn claim(
        &self,
        applicant: &ApplicantId,
        token: &SessionToken,
        now: Timestamp,
    ) -> Result<VerificationSession, VerificationError> {
        let mut slots = self.slots.lock().await;

        let session = match slots.get(applicant) {
            Some(Slot::Pending(session)) if session.token() == token => session.clone(),
            _ => return Err(VerificationError::StaleSubmission),
        };

        if session.is_expired(&now, self.ttl) {
            slots.remove(applicant);
            return Err(VerificationError::StaleSubmission);
        }

        slots.insert(applicant.clone(), Slot::InFlight { claimed_at: now });
        Ok(session)
    }

    async fn release(&self, applicant: &ApplicantId) {
        self.slots.lock().await.remove(applicant);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::GuildId;

    fn applicant() -> ApplicantId {
        ApplicantId::new("42").unwrap()
    }

    fn session(at: Timestamp) -> VerificationSession {
        VerificationSession::open(applicant(), GuildId::new("100").unwrap(), at)
    }

    #[tokio::test]
    async fn token_can_be_claimed_once() {
        let guard = InMemorySessionGuard::new(900);
        let now = Timestamp::now();
        let s = session(now);
        guard.open(s.clone()).await.unwrap();

        let claimed = guard.claim(&applicant(), s.token(), now).await.unwrap();
        assert_eq!(claimed.token(), s.token());

        let again = guard.claim(&applicant(), s.token(), now).await;
        assert_eq!(again, Err(VerificationError::StaleSubmission));
    }

    #[tokio::test]
    async fn reopening_replaces_pending_session() {
        let guard = InMemorySessionGuard::new(900);
        let now = Timestamp::now();
        let first = session(now);
        let second = session(now);
        guard.open(first.clone()).await.unwrap();
        guard.open(second.clone()).await.unwrap();

        assert_eq!(
            guard.claim(&applicant(), first.token(), now).await,
            Err(VerificationError::StaleSubmission)
        );
        assert!(guard.claim(&applicant(), second.token(), now).await.is_ok());
    }

    #[tokio::test]
    async fn open_is_refused_while_in_flight() {
        let guard = InMemorySessionGuard::new(900);
        let now = Timestamp::now();
        let s = session(now);
        guard.open(s.clone()).await.unwrap();
        guard.claim(&applicant(), s.token(), now).await.unwrap();

        let result = guard.open(session(now)).await;
        assert_eq!(result, Err(VerificationError::InProgress(applicant())));

        guard.release(&applicant()).await;
        assert!(guard.open(session(now)).await.is_ok());
    }

    #[tokio::test]
    async fn abandoned_claim_expires() {
        let guard = InMemorySessionGuard::new(900);
        let now = Timestamp::now();
        let s = session(now);
        guard.open(s.clone()).await.unwrap();
        guard.claim(&applicant(), s.token(), now).await.unwrap();

        let later = session(now.plus_secs(901));
        assert!(guard.open(later.clone()).await.is_ok());
        assert!(guard
            .claim(&applicant(), later.token(), now.plus_secs(901))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn expired_session_is_stale() {
        let guard = InMemorySessionGuard::new(60);
        let created = Timestamp::now();
        let s = session(created);
        guard.open(s.clone()).await.unwrap();

        let result = guard
            .claim(&applicant(), s.token(), created.plus_secs(61))
            .await;

        assert_eq!(result, Err(VerificationError::StaleSubmission));
        assert!(guard.is_empty().await);
    }

    #[tokio::test]
    async fn unknown_applicant_is_stale() {
        let guard = InMemorySessionGuard::new(900);
        let result = guard
            .claim(&applicant(), &SessionToken::new(), Timestamp::now())
            .await;
        assert_eq!(result, Err(VerificationError::StaleSubmission));
    }

    #[tokio::test]
    async fn concurrent_claims_admit_exactly_one() {
        let guard = Arc::new(InMemorySessionGuard::new(900));
        let now = Timestamp::now();
        let s = session(now);
        guard.open(s.clone()).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let guard = guard.clone();
            let token = *s.token();
            handles.push(tokio::spawn(async move {
                guard.claim(&applicant(), &token, now).await.is_ok()
            }));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 1);
    }
}
