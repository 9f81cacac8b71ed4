//! Audit sink configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Audit sink endpoint. The webhook URL embeds its own credential, so it
/// is held as a secret.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    pub webhook_url: SecretString,
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.webhook_url.expose_secret();
        if url.is_empty() {
            return Err(ValidationError::MissingRequired("AUDIT__WEBHOOK_URL"));
        }
        if !url.starts_with("https://") {
            return Err(ValidationError::WebhookMustBeHttps);
        }
        Ok(())
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            webhook_url: SecretString::new(String::new()),
        }
    }
}
