use tracing::warn;

use crate::cache::{LookupCache, SessionCacheHandle};
use crate::store::Value;

/// Caching contract the host exposes to a `lookup_key` function.
///
/// The host owns the storage and its lifetime; a function only reads and writes through it.
/// Only present values are ever cached, so `cache_has_key(key)` implies
/// `cached_value(key).is_some()`.
pub trait LookupContext {
    /// Records `value` under `key` and returns it.
    fn cache(&mut self, key: &str, value: Value) -> Value;

    fn cache_has_key(&self, key: &str) -> bool;

    fn cached_value(&self, key: &str) -> Option<Value>;
}

/// Adapts a [`LookupContext`] to the single-read [`LookupCache`] the resolver uses.
pub struct ContextCache<'a, C: LookupContext + ?Sized> {
    context: &'a mut C,
}

impl<'a, C: LookupContext + ?Sized> ContextCache<'a, C> {
    pub fn new(context: &'a mut C) -> Self {
        Self { context }
    }
}

impl<C: LookupContext + ?Sized> LookupCache for ContextCache<'_, C> {
    fn try_get(&self, key: &str) -> Option<Value> {
        if !self.context.cache_has_key(key) {
            return None;
        }

        let value = self.context.cached_value(key);
        if value.is_none() {
            // Host reported the key but holds no value; fetch and overwrite the entry.
            warn!(key, "Lookup context has key without a cached value");
        }
        value
    }

    fn insert(&mut self, key: &str, value: Value) {
        self.context.cache(key, value);
    }
}

/// A [`LookupContext`] over a bounded session cache, standing in for the host in tools and
/// tests.
///
/// Clones share the same entries.
#[derive(Debug, Default, Clone)]
pub struct InMemoryContext {
    entries: SessionCacheHandle,
}

impl InMemoryContext {
    /// Creates a context with the default session capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context holding at most `capacity` entries.
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: SessionCacheHandle::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LookupContext for InMemoryContext {
    fn cache(&mut self, key: &str, value: Value) -> Value {
        self.entries.insert(key, value.clone());
        value
    }

    fn cache_has_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn cached_value(&self, key: &str) -> Option<Value> {
        self.entries.get(key)
    }
}
