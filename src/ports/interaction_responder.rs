//! InteractionResponder port - finalizing the applicant's ephemeral reply.
//!
//! The provisional acknowledgement is sent by the inbound adapter as the
//! immediate response to the submission event; this port replaces it with
//! the final message once the pipeline has run.

use async_trait::async_trait;

use crate::domain::verification::ReplyHandle;

use super::PlatformError;

#[async_trait]
pub trait InteractionResponder: Send + Sync {
    async fn finalize(&self, reply: &ReplyHandle, content: &str) -> Result<(), PlatformError>;
}
