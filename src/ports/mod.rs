//! Ports - Interfaces for external dependencies.
//!
//! Ports define the contracts that adapters must implement.
//! Following hexagonal architecture, the application layer depends only on
//! these traits, never on a concrete platform client or audit transport.

mod audit_sink;
mod channel_messenger;
mod guild_directory;
mod interaction_responder;
mod member_moderation;
mod platform_error;
mod session_guard;

pub use audit_sink::{AuditError, AuditSink};
pub use channel_messenger::ChannelMessenger;
pub use guild_directory::GuildDirectory;
pub use interaction_responder::InteractionResponder;
pub use member_moderation::MemberModeration;
pub use platform_error::PlatformError;
pub use session_guard::SessionGuard;
