//! hiera-redis library crate (used by the `hiera-redis` binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Resolution
//! - [`Resolver`], [`Resolution`], [`LookupStatus`] - cache-or-fetch policy
//! - [`effective_key`] - scope-qualified store key (`scope:key`)
//!
//! ## Host Boundary
//! - [`RedisLookupKey`], [`LookupContext`], [`LookupError`] - the `redis_lookup_key` function
//! - [`InMemoryContext`] - host stand-in for tools and tests
//!
//! ## Caching & Store
//! - [`LookupCache`], [`SessionCache`] - lookup-session cache
//! - [`KeyValueStore`], [`StoreConnector`], [`RedisStore`] - remote store access
//!
//! ## Configuration
//! - [`StoreConfig`], [`LookupOptions`] - connection settings and per-lookup options
//!
//! ## Test/Mock Support
//! [`MockStore`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod function;
pub mod options;
pub mod resolver;
pub mod store;

pub use cache::{LookupCache, SessionCache, SessionCacheHandle};
pub use config::{ConfigError, StoreConfig, UrlOverrides};
pub use constants::{
    DEFAULT_REDIS_DB, DEFAULT_REDIS_HOST, DEFAULT_REDIS_PORT, DEFAULT_SESSION_CAPACITY,
    DEFAULT_TIMEOUT_MS, SCOPE_SEPARATOR,
};
pub use function::{
    ContextCache, FUNCTION_NAME, InMemoryContext, LookupContext, LookupError, LookupResult,
    RedisLookupKey,
};
pub use options::{LookupOptions, OptionsError};
pub use resolver::{LookupStatus, Resolution, Resolver, effective_key, fetch};
#[cfg(any(test, feature = "mock"))]
pub use store::{MockStore, StoreCall};
pub use store::{
    KeyType, KeyValueStore, RedisConnector, RedisStore, StoreConnector, StoreError, StoreResult,
    Value,
};
