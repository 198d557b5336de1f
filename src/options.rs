//! Per-lookup options passed by the host with every `lookup_key` call.
//!
//! The host hands over its whole options hash, so unknown keys are ignored. Only `scope`
//! changes resolution; the remaining keys override the connection settings from
//! [`crate::config::StoreConfig`].

use std::path::PathBuf;
use std::str::FromStr;

use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

/// Errors raised while reading the host's options hash.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The options payload was not an object.
    #[error("lookup options must be an object, got {kind}")]
    NotAnObject { kind: &'static str },

    /// A recognized option had the wrong shape.
    #[error("invalid lookup option '{name}': {reason}")]
    InvalidOption { name: &'static str, reason: String },
}

/// Recognized lookup options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupOptions {
    /// Namespace prefix joined to the key with `:`.
    pub scope: Option<String>,
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub db: Option<i64>,
    pub password: Option<String>,
    pub socket: Option<PathBuf>,
}

impl LookupOptions {
    /// Options that only set a scope.
    pub fn scoped(scope: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
            ..Default::default()
        }
    }

    /// Parses the host's options object. `null` yields the defaults.
    pub fn from_json(value: &JsonValue) -> Result<Self, OptionsError> {
        let map = match value {
            JsonValue::Null => return Ok(Self::default()),
            JsonValue::Object(map) => map,
            other => {
                return Err(OptionsError::NotAnObject {
                    kind: json_kind(other),
                });
            }
        };

        Ok(Self {
            scope: string_option(map, "scope")?,
            url: string_option(map, "url")?,
            host: string_option(map, "host")?,
            port: number_option(map, "port")?,
            db: number_option(map, "db")?,
            password: string_option(map, "password")?,
            socket: string_option(map, "socket")?.map(PathBuf::from),
        })
    }

    /// Returns `true` if any option changes where the store connection goes.
    pub fn has_connection_overrides(&self) -> bool {
        self.url.is_some()
            || self.host.is_some()
            || self.port.is_some()
            || self.db.is_some()
            || self.password.is_some()
            || self.socket.is_some()
    }
}

fn string_option(
    map: &Map<String, JsonValue>,
    name: &'static str,
) -> Result<Option<String>, OptionsError> {
    match map.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(OptionsError::InvalidOption {
            name,
            reason: format!("expected a string, got {}", json_kind(other)),
        }),
    }
}

/// Reads an integer option, accepting numeric strings as well.
fn number_option<T>(
    map: &Map<String, JsonValue>,
    name: &'static str,
) -> Result<Option<T>, OptionsError>
where
    T: FromStr + TryFrom<i64>,
{
    let invalid = |reason: String| OptionsError::InvalidOption { name, reason };

    match map.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => n
            .as_i64()
            .and_then(|v| T::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| invalid(format!("number {n} out of range"))),
        Some(JsonValue::String(s)) => s
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| invalid(format!("'{s}' is not a valid number"))),
        Some(other) => Err(invalid(format!(
            "expected a number, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_default() {
        let options = LookupOptions::from_json(&json!({})).expect("should parse");
        assert_eq!(options, LookupOptions::default());
        assert!(!options.has_connection_overrides());
    }

    #[test]
    fn test_null_is_default() {
        let options = LookupOptions::from_json(&JsonValue::Null).expect("should parse");
        assert!(options.scope.is_none());
    }

    #[test]
    fn test_scope_and_unknown_keys() {
        let options = LookupOptions::from_json(&json!({
            "scope": "common",
            "path": "/etc/puppetlabs/code/hiera.yaml",
            "uri": "ignored"
        }))
        .expect("should parse");

        assert_eq!(options.scope.as_deref(), Some("common"));
        assert!(!options.has_connection_overrides());
    }

    #[test]
    fn test_port_and_db_accept_strings() {
        let options = LookupOptions::from_json(&json!({
            "host": "redis.internal",
            "port": "6380",
            "db": 2
        }))
        .expect("should parse");

        assert_eq!(options.host.as_deref(), Some("redis.internal"));
        assert_eq!(options.port, Some(6380));
        assert_eq!(options.db, Some(2));
        assert!(options.has_connection_overrides());
    }

    #[test]
    fn test_port_out_of_range() {
        let err = LookupOptions::from_json(&json!({ "port": 70000 })).unwrap_err();
        assert!(matches!(
            err,
            OptionsError::InvalidOption { name: "port", .. }
        ));
    }

    #[test]
    fn test_non_string_scope_rejected() {
        let err = LookupOptions::from_json(&json!({ "scope": ["a", "b"] })).unwrap_err();
        assert!(matches!(
            err,
            OptionsError::InvalidOption { name: "scope", .. }
        ));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = LookupOptions::from_json(&json!("common")).unwrap_err();
        assert!(matches!(err, OptionsError::NotAnObject { kind: "string" }));
    }

    #[test]
    fn test_scoped_constructor() {
        let options = LookupOptions::scoped("nodes");
        assert_eq!(options.scope.as_deref(), Some("nodes"));
        assert!(options.host.is_none());
    }
}
