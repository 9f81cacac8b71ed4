//! HTTP adapters - the inbound interaction surface.

pub mod interactions;

pub use interactions::{interactions_router, InteractionAppState, InteractionVerifier};
