//! Error types for envguard operations.
//!
//! This module defines [`EnvGuardError`], the error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - `InvalidArgument`, `DuplicateKey` and `ContractViolation` are programmer
//!   errors: they surface at startup and are not meant to be recovered from
//! - `MismatchedEnvironment` is the expected, catchable outcome of a failed
//!   pairing check
//! - Use `anyhow::Error` (via `EnvGuardError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Marker shown in diagnostics in place of an environment that could not
/// be determined.
pub const UNKNOWN_ENVIRONMENT: &str = "[NULL]";

/// Core error type for envguard operations.
#[derive(Debug, Error)]
pub enum EnvGuardError {
    /// A required input is missing or malformed.
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    /// Two environment types share a name or an acronym.
    #[error("Duplicate environment {index} '{key}'")]
    DuplicateKey { key: String, index: KeyIndex },

    /// A metadata provider broke its contract.
    #[error("Contract violation in '{operation}': {message}")]
    ContractViolation { operation: String, message: String },

    /// A resource does not belong to the application's environment.
    #[error(
        "Resource '{resource_name}' is in environment '{}', which does not match the application environment '{}'",
        or_unknown(.resource_environment),
        or_unknown(.application_environment)
    )]
    MismatchedEnvironment {
        resource_name: String,
        resource_environment: Option<String>,
        application_environment: Option<String>,
    },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Which registry index a duplicate key collided in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIndex {
    Name,
    Acronym,
}

impl std::fmt::Display for KeyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Acronym => write!(f, "acronym"),
        }
    }
}

impl EnvGuardError {
    pub(crate) fn invalid_argument(argument: &str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn contract_violation(operation: &str, message: impl Into<String>) -> Self {
        Self::ContractViolation {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    /// Whether this is the expected pairing failure rather than a defect.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::MismatchedEnvironment { .. })
    }
}

fn or_unknown(environment: &Option<String>) -> &str {
    environment.as_deref().unwrap_or(UNKNOWN_ENVIRONMENT)
}

/// Result type alias for envguard operations.
pub type Result<T> = std::result::Result<T, EnvGuardError>;
