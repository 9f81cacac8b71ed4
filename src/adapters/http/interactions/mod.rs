//! HTTP adapter for platform interactions.
//!
//! - `POST /interactions` - Signed interaction callbacks (ping, trigger, form submission)
//! - `GET /health` - Liveness probe

pub mod dto;
pub mod handlers;
pub mod routes;
pub mod signature;

pub use handlers::{InteractionApiError, InteractionAppState};
pub use routes::interactions_router;
pub use signature::{InteractionVerifier, SignatureError, SIGNATURE_HEADER, TIMESTAMP_HEADER};
