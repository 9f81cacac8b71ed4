//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `discord` - Platform REST client, directory cache and an in-memory double
//! - `audit` - Webhook audit sink and a recording double
//! - `session` - In-memory per-applicant session guard
//! - `http` - Inbound interactions endpoint
//! - `journal` - Ordered record of side effects, shared by the doubles

pub mod audit;
pub mod discord;
pub mod http;
pub mod journal;
pub mod session;

pub use audit::{RecordingAuditSink, WebhookAuditSink};
pub use discord::{CachedGuildDirectory, DiscordRestClient, MockOperation, MockPlatform};
pub use journal::{CallJournal, RecordedCall};
pub use session::InMemorySessionGuard;
