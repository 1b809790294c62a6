//! Configuration errors.
//!
//! The simulation itself never fails: pool exhaustion, cooldowns and
//! duplicate collisions are all silent no-ops. Errors only exist where
//! tuning data enters the crate from outside.

use std::fmt;

/// Error raised while loading or validating a [`crate::Tuning`].
#[derive(Debug)]
pub enum ConfigError {
    /// The tuning file could not be read.
    Io {
        /// Path that was being read.
        path: String,
        source: std::io::Error,
    },

    /// The tuning document is not valid JSON for [`crate::Tuning`].
    Parse(serde_json::Error),

    /// A value parsed fine but is outside the range the simulation accepts.
    Invalid {
        /// Name of the tuning field.
        field: &'static str,
        /// The rejected value, formatted for logging.
        value: String,
        /// Human-readable description of the accepted range.
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read tuning file '{}': {}", path, source)
            }
            ConfigError::Parse(err) => write!(f, "failed to parse tuning: {}", err),
            ConfigError::Invalid {
                field,
                value,
                reason,
            } => write!(f, "tuning field '{}' = {} is invalid: {}", field, value, reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Convenience alias: a `Result` using [`ConfigError`] as the error type.
pub type Result<T> = std::result::Result<T, ConfigError>;
