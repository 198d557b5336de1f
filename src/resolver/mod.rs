//! Cache-or-fetch resolution of a single key.
//!
//! The cache is consulted first under the caller's key. On a miss the key is qualified with
//! the optional scope (`scope:key`), fetched from a freshly connected store, and written back
//! to the cache under the original key. Not-found is a [`Resolution`] variant, not an error.

pub mod types;


pub use types::{LookupStatus, Resolution};

use std::borrow::Cow;

use tracing::{Span, debug, info, instrument};

use crate::cache::LookupCache;
use crate::constants::SCOPE_SEPARATOR;
use crate::options::LookupOptions;
use crate::store::{KeyValueStore, StoreConnector, StoreResult, Value};

/// Returns the key sent to the store: `scope:key` when a scope is given, else `key`.
pub fn effective_key<'a>(key: &'a str, scope: Option<&str>) -> Cow<'a, str> {
    match scope {
        Some(scope) => Cow::Owned(format!("{scope}{SCOPE_SEPARATOR}{key}")),
        None => Cow::Borrowed(key),
    }
}

/// Probes the type of `key` and reads it. `Ok(None)` if the store does not hold it.
pub fn fetch<S: KeyValueStore + ?Sized>(store: &mut S, key: &str) -> StoreResult<Option<Value>> {
    let kind = store.key_type(key)?;
    if !kind.exists() {
        return Ok(None);
    }

    store.read(key, &kind)
}

/// Resolves keys against a cache first, then the store behind `C`.
#[derive(Debug, Clone)]
pub struct Resolver<C: StoreConnector> {
    connector: C,
}

impl<C: StoreConnector> Resolver<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Resolves `key`.
    ///
    /// A cache hit returns without connecting to the store. Only fetched values are written
    /// to the cache. Store failures propagate unchanged.
    #[instrument(
        skip(self, options, cache),
        fields(key = key, scope = options.scope.as_deref(), effective_key = tracing::field::Empty)
    )]
    pub fn resolve<K: LookupCache + ?Sized>(
        &self,
        key: &str,
        options: &LookupOptions,
        cache: &mut K,
    ) -> StoreResult<Resolution> {
        if let Some(value) = cache.try_get(key) {
            debug!("Lookup cache hit");
            return Ok(Resolution::Cached(value));
        }

        let effective = effective_key(key, options.scope.as_deref());
        Span::current().record("effective_key", &*effective);
        debug!("Lookup cache miss, fetching from store");

        let mut store = self.connector.connect(options)?;

        match fetch(&mut store, &effective)? {
            Some(value) => {
                info!(kind = %value.key_type(), "Fetched value from store");
                cache.insert(key, value.clone());
                Ok(Resolution::Fetched(value))
            }
            None => {
                debug!("Key not found in store");
                Ok(Resolution::NotFound)
            }
        }
    }
}
