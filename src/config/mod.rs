//! Application configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. An optional `age-gate.{toml,yaml,json}` file is read
//! first (or the file named by `AGE_GATE_CONFIG`), then environment variables
//! with the `AGE_GATE` prefix override it. Nested values use `__` as the
//! separator.
//!
//! # Example
//!
//! ```no_run
//! use age_gate::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Listening on {}", config.server.socket_addr().unwrap());
//! ```

mod announcement;
mod audit;
mod discord;
mod error;
mod guild;
mod server;
mod verification;

pub use announcement::AnnouncementConfig;
pub use audit::AuditConfig;
pub use discord::DiscordConfig;
pub use error::{ConfigError, ValidationError};
pub use guild::GuildConfig;
pub use server::{Environment, LogFormat, ServerConfig};
pub use verification::{SupplementaryFieldConfig, UnderageAction, VerificationConfig};

use serde::Deserialize;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_VAR: &str = "AGE_GATE_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "age-gate";

/// Root application configuration
///
/// Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Interaction endpoint and logging
    #[serde(default)]
    pub server: ServerConfig,

    /// Platform credentials
    pub discord: DiscordConfig,

    /// Gated guild, announcement channel and membership role
    pub guild: GuildConfig,

    /// Audit sink endpoint
    pub audit: AuditConfig,

    #[serde(default)]
    pub verification: VerificationConfig,

    #[serde(default)]
    pub announcement: AnnouncementConfig,
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads `age-gate.*` from the working directory if present, or the
    ///    file named by `AGE_GATE_CONFIG` (which must then exist)
    /// 3. Reads environment variables with `AGE_GATE` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `AGE_GATE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `AGE_GATE__GUILD__ROLE_ID=...` -> `guild.role_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required values are missing or cannot be
    /// parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let file = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => config::File::with_name(&path).required(true),
            Err(_) => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::default()
                    .prefix("AGE_GATE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid value found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.discord.validate()?;
        self.guild.validate()?;
        self.audit.validate()?;
        self.verification.validate()?;
        Ok(())
    }
}
