//! SessionGuard port - at most one in-flight submission per applicant.
//!
//! # Lifecycle
//!
//! ```text
//! open ──► pending ──claim──► in flight ──release──► (gone)
//!            │  ▲
//!            └──┘ open again replaces the token
//! ```
//!
//! - `open` registers a fresh session. An older pending session for the same
//!   applicant is replaced, which makes its form stale. If the applicant has
//!   a submission in flight, `open` is refused with `InProgress`.
//! - `claim` succeeds exactly once per session token: the token must match
//!   the applicant's pending session and must not have expired. Any other
//!   claim is `StaleSubmission`.
//! - `release` ends the round trip once the pipeline finishes.

use async_trait::async_trait;

use crate::domain::foundation::{ApplicantId, SessionToken, Timestamp};
use crate::domain::verification::{VerificationError, VerificationSession};

#[async_trait]
pub trait SessionGuard: Send + Sync {
    async fn open(&self, session: VerificationSession) -> Result<(), VerificationError>;

    async fn claim(
        &self,
        applicant: &ApplicantId,
        token: &SessionToken,
        now: Timestamp,
    ) -> Result<VerificationSession, VerificationError>;

    async fn release(&self, applicant: &ApplicantId);
}
