//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("{0} must be a numeric snowflake")]
    InvalidSnowflake(&'static str),

    #[error("Discord public key must be 64 hex characters")]
    InvalidPublicKey,

    #[error("Discord API base URL must be an http(s) URL")]
    InvalidApiBaseUrl,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Audit webhook URL must use HTTPS")]
    WebhookMustBeHttps,

    #[error("Minimum age must be between 1 and 150")]
    InvalidMinimumAge,

    #[error("Session lifetime must be positive")]
    InvalidSessionTtl,

    #[error("At most {0} supplementary fields fit in the form")]
    TooManySupplementaryFields(usize),

    #[error("Supplementary field '{0}' has invalid length limits")]
    InvalidFieldLength(String),

    #[error("Supplementary field id '{0}' is empty, duplicated or reserved")]
    InvalidFieldId(String),
}
