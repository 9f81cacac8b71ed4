//! Audit sink adapters.
//!
//! - `webhook_sink` - posts embeds to an incoming webhook
//! - `mock` - records events in memory

mod mock;
mod webhook_sink;

pub use mock::RecordingAuditSink;
pub use webhook_sink::{audit_embed, WebhookAuditSink};
