//! Age Gate - age verification for community chat servers.
//!
//! An applicant presses the announcement's button, submits a birthdate
//! through a modal form, and is either granted the membership role or
//! removed from the server. Every decision is mirrored to an audit webhook.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod telemetry;
