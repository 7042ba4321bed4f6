//! Error types for tracker operations and configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Recoverable errors reported by the tracker core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("unknown role `{0}`")]
    UnknownRole(String),

    #[error("cannot {action} while the game clock is running")]
    InvalidState { action: &'static str },

    #[error("invalid game time `{input}`, expected MM:SS")]
    InvalidFormat { input: String },

    #[error("game time {minutes}:{seconds} out of range, minutes and seconds must be 0-59")]
    InvalidRange { minutes: i64, seconds: i64 },
}

/// Errors during start-up configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    ParseToml(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    WriteToml(#[from] toml::ser::Error),

    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}
