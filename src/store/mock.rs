//! In-memory store for tests (records every command it receives).

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::error::{StoreError, StoreResult};
use super::types::{KeyType, Value};
use super::{KeyValueStore, StoreConnector};
use crate::options::LookupOptions;

/// A command observed by a [`MockStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Connect,
    Type(String),
    Read(String, KeyType),
}

#[derive(Default)]
struct MockState {
    entries: HashMap<String, Value>,
    overridden_types: HashMap<String, KeyType>,
    calls: Vec<StoreCall>,
    connect_error: Option<String>,
}

/// Shared in-memory store. Clones see the same data and call log.
///
/// Acts as its own [`StoreConnector`]: every `connect` hands out a clone.
#[derive(Default, Clone)]
pub struct MockStore {
    state: Arc<Mutex<MockState>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key` (an effective key, scope included).
    pub fn insert(&self, key: &str, value: impl Into<Value>) {
        self.state.lock().entries.insert(key.to_string(), value.into());
    }

    /// Makes `TYPE key` report `kind` regardless of the stored value.
    pub fn set_type(&self, key: &str, kind: KeyType) {
        self.state
            .lock()
            .overridden_types
            .insert(key.to_string(), kind);
    }

    /// Makes every subsequent `connect` fail with `reason`.
    pub fn fail_connections(&self, reason: &str) {
        self.state.lock().connect_error = Some(reason.to_string());
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.state.lock().entries.remove(key)
    }

    /// Returns every recorded call, oldest first.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().calls.clone()
    }

    /// Returns the keys sent to the store, in order (connects excluded).
    pub fn queried_keys(&self) -> Vec<String> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                StoreCall::Type(key) | StoreCall::Read(key, _) => Some(key.clone()),
                StoreCall::Connect => None,
            })
            .collect()
    }

    /// Number of calls that reached the store, connects included.
    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    pub fn connect_count(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| matches!(call, StoreCall::Connect))
            .count()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }
}

impl KeyValueStore for MockStore {
    fn key_type(&mut self, key: &str) -> StoreResult<KeyType> {
        let mut state = self.state.lock();
        state.calls.push(StoreCall::Type(key.to_string()));

        if let Some(kind) = state.overridden_types.get(key) {
            return Ok(kind.clone());
        }

        Ok(state
            .entries
            .get(key)
            .map(Value::key_type)
            .unwrap_or(KeyType::None))
    }

    fn read(&mut self, key: &str, kind: &KeyType) -> StoreResult<Option<Value>> {
        let mut state = self.state.lock();
        state
            .calls
            .push(StoreCall::Read(key.to_string(), kind.clone()));

        if let KeyType::Other(name) = kind {
            return Err(StoreError::UnsupportedType {
                key: key.to_string(),
                kind: name.clone(),
            });
        }

        Ok(state
            .entries
            .get(key)
            .filter(|value| &value.key_type() == kind)
            .cloned())
    }
}

impl StoreConnector for MockStore {
    type Store = MockStore;

    fn connect(&self, _options: &LookupOptions) -> StoreResult<MockStore> {
        let mut state = self.state.lock();
        state.calls.push(StoreCall::Connect);

        match state.connect_error {
            Some(ref reason) => Err(StoreError::Unavailable {
                reason: reason.clone(),
            }),
            None => Ok(self.clone()),
        }
    }
}

impl std::fmt::Debug for MockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MockStore")
            .field("entries", &state.entries.len())
            .field("calls", &state.calls.len())
            .finish()
    }
}
