use std::collections::BTreeMap;

use serde::Serialize;

/// Data type reported by the store's `TYPE` probe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyType {
    String,
    List,
    Set,
    ZSet,
    Hash,
    /// The key does not exist.
    None,
    /// A type this crate does not read (e.g. `stream`).
    Other(String),
}

impl KeyType {
    /// Parses a `TYPE` reply.
    pub fn from_reply(reply: &str) -> Self {
        match reply {
            "string" => KeyType::String,
            "list" => KeyType::List,
            "set" => KeyType::Set,
            "zset" => KeyType::ZSet,
            "hash" => KeyType::Hash,
            "none" => KeyType::None,
            other => KeyType::Other(other.to_string()),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            KeyType::String => "string",
            KeyType::List => "list",
            KeyType::Set => "set",
            KeyType::ZSet => "zset",
            KeyType::Hash => "hash",
            KeyType::None => "none",
            KeyType::Other(name) => name,
        }
    }

    /// Returns `true` if the key exists in the store.
    #[inline]
    pub fn exists(&self) -> bool {
        !matches!(self, KeyType::None)
    }
}

impl std::fmt::Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A resolved value.
///
/// Serializes untagged: strings as JSON strings, collections as arrays, hashes as objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    List(Vec<String>),
    /// Members sorted so repeated lookups return the same order.
    Set(Vec<String>),
    /// Members in score order.
    SortedSet(Vec<String>),
    Hash(BTreeMap<String, String>),
}

impl Value {
    /// Returns the string payload for string-typed values.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the store type this value was read from.
    pub fn key_type(&self) -> KeyType {
        match self {
            Value::String(_) => KeyType::String,
            Value::List(_) => KeyType::List,
            Value::Set(_) => KeyType::Set,
            Value::SortedSet(_) => KeyType::ZSet,
            Value::Hash(_) => KeyType::Hash,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
