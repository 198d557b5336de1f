//! Host-facing `redis_lookup_key` function.
//!
//! Converts the host's calling convention (options hash, [`LookupContext`]) into a
//! [`Resolver`] call and turns [`Resolution::NotFound`] into [`LookupError::NotFound`], the
//! signal a host maps onto its own "no value for this key" control flow.

pub mod context;


pub use context::{ContextCache, InMemoryContext, LookupContext};

use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::StoreConfig;
use crate::options::{LookupOptions, OptionsError};
use crate::resolver::{Resolution, Resolver};
use crate::store::{RedisConnector, StoreConnector, StoreError, Value};

/// Name the host registers this function under.
pub const FUNCTION_NAME: &str = "redis_lookup_key";

#[derive(Debug, Error)]
/// Errors returned to the host by [`RedisLookupKey::execute`].
pub enum LookupError {
    /// No value exists for the key. Hosts treat this as "not found", not as a failure.
    #[error("no value found for key '{key}'")]
    NotFound { key: String },

    /// The options hash was malformed.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// The store could not be reached or answered with an error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LookupError {
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound { .. })
    }
}

/// Convenience result type for host lookups.
pub type LookupResult<T> = Result<T, LookupError>;

/// The `lookup_key` function: cache first, then Redis.
#[derive(Debug, Clone)]
pub struct RedisLookupKey<C: StoreConnector = RedisConnector> {
    resolver: Resolver<C>,
}

impl RedisLookupKey<RedisConnector> {
    /// Creates the function against a Redis endpoint.
    pub fn from_config(config: StoreConfig) -> Self {
        Self::new(RedisConnector::new(config))
    }
}

impl<C: StoreConnector> RedisLookupKey<C> {
    pub fn new(connector: C) -> Self {
        Self {
            resolver: Resolver::new(connector),
        }
    }

    pub fn resolver(&self) -> &Resolver<C> {
        &self.resolver
    }

    /// Host entry point: `execute(key, options, context)`.
    pub fn execute<X: LookupContext + ?Sized>(
        &self,
        key: &str,
        options: &JsonValue,
        context: &mut X,
    ) -> LookupResult<Value> {
        let options = LookupOptions::from_json(options)?;
        self.execute_with_options(key, &options, context)
    }

    /// Like [`RedisLookupKey::execute`] with options already parsed.
    #[instrument(skip(self, options, context), fields(function = FUNCTION_NAME, key = key))]
    pub fn execute_with_options<X: LookupContext + ?Sized>(
        &self,
        key: &str,
        options: &LookupOptions,
        context: &mut X,
    ) -> LookupResult<Value> {
        let mut cache = ContextCache::new(context);

        match self.resolver.resolve(key, options, &mut cache)? {
            Resolution::Cached(value) | Resolution::Fetched(value) => Ok(value),
            Resolution::NotFound => {
                debug!("Signalling not found to host");
                Err(LookupError::NotFound {
                    key: key.to_string(),
                })
            }
        }
    }
}
