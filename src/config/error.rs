//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Database index could not be parsed or is negative.
    #[error("invalid database index '{value}': must be a non-negative integer")]
    InvalidDb { value: String },

    /// Connection URL uses a scheme the Redis client does not understand.
    #[error("unsupported connection url '{url}': expected redis://, rediss://, unix:// or redis+unix://")]
    UnsupportedUrl { url: String },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is a directory (when a socket was expected).
    #[error("path is a directory, expected a unix socket: {path}")]
    IsADirectory { path: PathBuf },
}
