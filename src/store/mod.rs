//! Remote key-value store access.
//!
//! The resolver only needs two capabilities from the store: a `TYPE` probe and a typed read.
//! [`StoreConnector`] opens one connection per resolution so cache hits never touch the
//! network.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod redis_store;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{StoreError, StoreResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockStore, StoreCall};
pub use redis_store::{RedisConnector, RedisStore};
pub use types::{KeyType, Value};

use crate::options::LookupOptions;

/// Read-only access to a key-value store.
pub trait KeyValueStore {
    /// Probes the stored type of `key`.
    fn key_type(&mut self, key: &str) -> StoreResult<KeyType>;

    /// Reads `key` as `kind`. Returns `Ok(None)` if the key does not exist.
    ///
    /// Callers pass the type from [`KeyValueStore::key_type`]; unsupported kinds yield
    /// [`StoreError::UnsupportedType`].
    fn read(&mut self, key: &str, kind: &KeyType) -> StoreResult<Option<Value>>;
}

/// Opens store connections for a lookup.
pub trait StoreConnector {
    type Store: KeyValueStore;

    /// Opens a connection, applying any connection overrides from `options`.
    fn connect(&self, options: &LookupOptions) -> StoreResult<Self::Store>;
}
