//! Lookup session cache (in-memory).
//!
//! One [`SessionCache`] lives for one lookup session and is keyed by the caller's original
//! (unscoped) key. Capacity-bounded; moka evicts least-recently-used entries.

use moka::sync::Cache;
use std::sync::Arc;

use super::LookupCache;
use crate::constants::DEFAULT_SESSION_CAPACITY;
use crate::store::Value;

/// In-memory cache of resolved values for one lookup session.
pub struct SessionCache {
    entries: Cache<String, Value>,
}

impl SessionCache {
    /// Creates a cache with the default capacity.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SESSION_CAPACITY)
    }

    /// Creates a cache with a max entry capacity (LRU eviction).
    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key)
    }

    #[inline]
    pub fn insert(&self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    #[inline]
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Returns `true` if the cache holds `key`.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of cached entries.
    ///
    /// Approximate until [`SessionCache::run_pending_tasks`] has run.
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    /// Clears all entries (ends the session).
    #[inline]
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Runs any pending maintenance tasks in the underlying cache.
    #[inline]
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }

    /// Returns an iterator of currently cached keys.
    pub fn keys(&self) -> impl Iterator<Item = String> {
        self.entries.iter().map(|(k, _)| k.as_ref().clone())
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupCache for SessionCache {
    fn try_get(&self, key: &str) -> Option<Value> {
        self.get(key)
    }

    fn insert(&mut self, key: &str, value: Value) {
        SessionCache::insert(self, key, value);
    }
}

impl std::fmt::Debug for SessionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

#[derive(Clone)]
/// Shared handle to a [`SessionCache`], for hosts that resolve keys from several places.
pub struct SessionCacheHandle {
    inner: Arc<SessionCache>,
}

impl SessionCacheHandle {
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SessionCache::new()),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            inner: Arc::new(SessionCache::with_capacity(capacity)),
        }
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.get(key)
    }

    #[inline]
    pub fn insert(&self, key: &str, value: Value) {
        self.inner.insert(key, value);
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn clear(&self) {
        self.inner.clear();
    }

    #[inline]
    pub fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks();
    }

    /// Returns the number of strong references to the underlying cache.
    #[inline]
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl Default for SessionCacheHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupCache for SessionCacheHandle {
    fn try_get(&self, key: &str) -> Option<Value> {
        self.inner.get(key)
    }

    fn insert(&mut self, key: &str, value: Value) {
        self.inner.insert(key, value);
    }
}

impl std::fmt::Debug for SessionCacheHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCacheHandle")
            .field("strong_count", &self.strong_count())
            .finish()
    }
}
