//! Chat platform (Discord) configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Credentials and endpoints for the chat platform
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    /// Bot token used for every REST call
    pub bot_token: SecretString,

    /// Application id; also the author id of messages the bot posts
    pub application_id: String,

    /// Hex-encoded Ed25519 key that signs inbound interactions
    pub public_key: String,

    /// REST API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl DiscordConfig {
    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate platform configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bot_token.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("DISCORD__BOT_TOKEN"));
        }
        if self.application_id.is_empty() {
            return Err(ValidationError::MissingRequired("DISCORD__APPLICATION_ID"));
        }
        if !self.application_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidSnowflake("DISCORD__APPLICATION_ID"));
        }
        if self.public_key.is_empty() {
            return Err(ValidationError::MissingRequired("DISCORD__PUBLIC_KEY"));
        }
        match hex::decode(&self.public_key) {
            Ok(bytes) if bytes.len() == 32 => {}
            _ => return Err(ValidationError::InvalidPublicKey),
        }
        if !(self.api_base_url.starts_with("https://") || self.api_base_url.starts_with("http://")) {
            return Err(ValidationError::InvalidApiBaseUrl);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            bot_token: SecretString::new(String::new()),
            application_id: String::new(),
            public_key: String::new(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://discord.com/api/v10".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
