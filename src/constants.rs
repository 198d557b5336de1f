//! Cross-cutting, shared constants.

/// Joins a scope and a key into the effective store key.
pub const SCOPE_SEPARATOR: &str = ":";

pub const DEFAULT_REDIS_HOST: &str = "127.0.0.1";
pub const DEFAULT_REDIS_PORT: u16 = 6379;
pub const DEFAULT_REDIS_DB: i64 = 0;

/// Connect/read timeout applied to store connections, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Max entries held by a [`crate::cache::SessionCache`].
pub const DEFAULT_SESSION_CAPACITY: u64 = 10_000;

/// URL schemes accepted by the Redis client.
pub const SUPPORTED_URL_SCHEMES: [&str; 4] = ["redis://", "rediss://", "unix://", "redis+unix://"];
