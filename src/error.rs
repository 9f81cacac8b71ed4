//! Top-level error for the binary.

use std::fmt;

use crate::adapters::http::interactions::SignatureError;
use crate::config::{ConfigError, ValidationError};
use crate::domain::verification::VerificationError;
use crate::ports::{AuditError, PlatformError};
use crate::telemetry::TelemetryError;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Platform(PlatformError),
    Audit(AuditError),
    Signature(SignatureError),
    Verification(VerificationError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Platform(err) => write!(f, "platform client error: {}", err),
            AppError::Audit(err) => write!(f, "audit sink error: {}", err),
            AppError::Signature(err) => write!(f, "interaction verifier error: {}", err),
            AppError::Verification(err) => write!(f, "verification error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Platform(err) => Some(err),
            AppError::Audit(err) => Some(err),
            AppError::Signature(err) => Some(err),
            AppError::Verification(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::Config(ConfigError::ValidationFailed(value))
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<PlatformError> for AppError {
    fn from(value: PlatformError) -> Self {
        Self::Platform(value)
    }
}

impl From<AuditError> for AppError {
    fn from(value: AuditError) -> Self {
        Self::Audit(value)
    }
}

impl From<SignatureError> for AppError {
    fn from(value: SignatureError) -> Self {
        Self::Signature(value)
    }
}

impl From<VerificationError> for AppError {
    fn from(value: VerificationError) -> Self {
        Self::Verification(value)
    }
}
