//! Test fixtures for integration tests.

use hiera_redis::{MockStore, RedisLookupKey, Value};

pub const DEFAULT_SCOPE: &str = "common";

/// Seeds a [`MockStore`] with a small hierarchy of values.
#[derive(Default)]
pub struct StoreBuilder {
    entries: Vec<(String, Value)>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string(mut self, key: &str, value: &str) -> Self {
        self.entries.push((key.to_string(), Value::from(value)));
        self
    }

    pub fn list(mut self, key: &str, items: &[&str]) -> Self {
        self.entries.push((
            key.to_string(),
            Value::List(items.iter().map(|s| s.to_string()).collect()),
        ));
        self
    }

    pub fn hash(mut self, key: &str, fields: &[(&str, &str)]) -> Self {
        self.entries.push((
            key.to_string(),
            Value::Hash(
                fields
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        ));
        self
    }

    pub fn build(self) -> MockStore {
        let store = MockStore::new();
        for (key, value) in self.entries {
            store.insert(&key, value);
        }
        store
    }
}

/// Store holding `foo` at the top level and under the default scope.
pub fn sample_store() -> MockStore {
    StoreBuilder::new()
        .string("foo", "bar")
        .string("common:foo", "scoped-bar")
        .list("common:ntp::servers", &["0.pool.ntp.org", "1.pool.ntp.org"])
        .hash("common:profile::web", &[("port", "8080"), ("vhost", "www")])
        .build()
}

pub fn lookup_function(store: &MockStore) -> RedisLookupKey<MockStore> {
    RedisLookupKey::new(store.clone())
}
