//! Lookup-session caching.
//!
//! The resolver sees a cache only through [`LookupCache`]: a single `try_get` read and an
//! `insert` write-back. [`SessionCache`] is the moka-backed implementation; a plain
//! `HashMap` works too, and hosts plug in their own through
//! [`crate::function::ContextCache`].

pub mod session;


use std::collections::HashMap;
use std::hash::BuildHasher;

pub use session::{SessionCache, SessionCacheHandle};

use crate::store::Value;

/// Cache consulted before the store, keyed by the original (unscoped) key.
pub trait LookupCache {
    /// Returns the cached value for `key`, if any.
    fn try_get(&self, key: &str) -> Option<Value>;

    /// Records a freshly fetched value.
    fn insert(&mut self, key: &str, value: Value);
}

impl<S: BuildHasher> LookupCache for HashMap<String, Value, S> {
    fn try_get(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }

    fn insert(&mut self, key: &str, value: Value) {
        HashMap::insert(self, key.to_string(), value);
    }
}
