//! Error type shared by the chat-platform ports.

use thiserror::Error;

/// A failed round trip to the chat platform.
///
/// "Not found" is not an error at this level: lookups return `Ok(None)` so
/// callers can tell a misconfigured identifier from a transport failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("network error: {0}")]
    Network(String),

    #[error("platform API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to decode platform response: {0}")]
    Decode(String),
}

impl PlatformError {
    pub fn network(message: impl Into<String>) -> Self {
        PlatformError::Network(message.into())
    }

    pub fn api(status: u16, body: impl Into<String>) -> Self {
        PlatformError::Api {
            status,
            body: body.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        PlatformError::Decode(message.into())
    }
}
