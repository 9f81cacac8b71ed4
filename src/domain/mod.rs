//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, timestamps, errors)
//! - `verification` - Age calculation, decisions, sessions, forms and audit records

pub mod foundation;
pub mod verification;
