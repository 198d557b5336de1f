use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by key-value store operations.
pub enum StoreError {
    /// Could not connect to the store.
    #[error("failed to connect to Redis at '{endpoint}': {source}")]
    ConnectionFailed {
        /// Endpoint with credentials removed.
        endpoint: String,
        #[source]
        source: redis::RedisError,
    },

    /// A command was sent but failed.
    #[error("{command} '{key}' failed: {source}")]
    CommandFailed {
        /// Command name (`TYPE`, `GET`, ...).
        command: &'static str,
        /// Effective key the command was sent for.
        key: String,
        #[source]
        source: redis::RedisError,
    },

    /// The key holds a type that cannot be resolved to a value.
    #[error("key '{key}' holds unsupported type '{kind}'")]
    UnsupportedType {
        /// Effective key.
        key: String,
        /// Type reported by the store.
        kind: String,
    },

    /// Store unavailable for a reason other than a client error (mock or test doubles).
    #[error("store unavailable: {reason}")]
    Unavailable {
        /// Error message.
        reason: String,
    },
}

impl StoreError {
    /// Returns `true` for failures to reach the store at all.
    pub fn is_connection_error(&self) -> bool {
        match self {
            StoreError::ConnectionFailed { .. } | StoreError::Unavailable { .. } => true,
            StoreError::CommandFailed { source, .. } => {
                source.is_io_error() || source.is_connection_dropped()
            }
            StoreError::UnsupportedType { .. } => false,
        }
    }
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
