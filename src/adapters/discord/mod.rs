//! Discord adapters.
//!
//! - `rest_client` - production implementation of the platform ports
//! - `cached_directory` - cache-then-fetch wrapper for resource lookups
//! - `mock` - in-memory platform for tests
//! - `payloads` - wire types shared with the interaction endpoint and the
//!   audit webhook

mod cached_directory;
mod mock;
pub mod payloads;
mod rest_client;

pub use cached_directory::CachedGuildDirectory;
pub use mock::{MockOperation, MockPlatform};
pub use rest_client::{encode_audit_reason, DiscordRestClient};
