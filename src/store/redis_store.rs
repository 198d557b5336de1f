//! Redis-backed [`KeyValueStore`] over a blocking connection.

use std::collections::BTreeMap;

use redis::{Client, Cmd, Connection, FromRedisValue, RedisError};
use tracing::{debug, instrument};

use super::error::{StoreError, StoreResult};
use super::types::{KeyType, Value};
use super::{KeyValueStore, StoreConnector};
use crate::config::StoreConfig;
use crate::options::LookupOptions;

/// A single blocking Redis connection.
pub struct RedisStore {
    conn: Connection,
    endpoint: String,
}

impl RedisStore {
    /// Connects using `config`, applying its timeout to connect, read and write.
    #[instrument(skip(config), fields(endpoint = %config.endpoint()))]
    pub fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let endpoint = config.endpoint();
        let connection_failed = |source: RedisError| StoreError::ConnectionFailed {
            endpoint: endpoint.clone(),
            source,
        };

        let info = config.connection_info().map_err(connection_failed)?;
        let client = Client::open(info).map_err(connection_failed)?;

        let conn = match config.timeout() {
            Some(timeout) => client.get_connection_with_timeout(timeout),
            None => client.get_connection(),
        }
        .map_err(connection_failed)?;

        conn.set_read_timeout(config.timeout())
            .map_err(connection_failed)?;
        conn.set_write_timeout(config.timeout())
            .map_err(connection_failed)?;

        debug!("Connected to Redis");

        Ok(Self { conn, endpoint })
    }

    /// Returns the endpoint this store is connected to (credentials removed).
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn query<T: FromRedisValue>(
        &mut self,
        command: &'static str,
        cmd: &Cmd,
        key: &str,
    ) -> StoreResult<T> {
        cmd.query(&mut self.conn)
            .map_err(|source| StoreError::CommandFailed {
                command,
                key: key.to_string(),
                source,
            })
    }
}

impl KeyValueStore for RedisStore {
    fn key_type(&mut self, key: &str) -> StoreResult<KeyType> {
        let reply: String = self.query("TYPE", redis::cmd("TYPE").arg(key), key)?;
        Ok(KeyType::from_reply(&reply))
    }

    fn read(&mut self, key: &str, kind: &KeyType) -> StoreResult<Option<Value>> {
        // Collections are never stored empty, so an empty reply means the key vanished
        // after the TYPE probe.
        let value = match kind {
            KeyType::String => {
                let value: Option<String> = self.query("GET", redis::cmd("GET").arg(key), key)?;
                value.map(Value::String)
            }
            KeyType::List => {
                let items: Vec<String> =
                    self.query("LRANGE", redis::cmd("LRANGE").arg(key).arg(0).arg(-1), key)?;
                (!items.is_empty()).then_some(Value::List(items))
            }
            KeyType::Set => {
                let mut members: Vec<String> =
                    self.query("SMEMBERS", redis::cmd("SMEMBERS").arg(key), key)?;
                members.sort();
                (!members.is_empty()).then_some(Value::Set(members))
            }
            KeyType::ZSet => {
                let members: Vec<String> =
                    self.query("ZRANGE", redis::cmd("ZRANGE").arg(key).arg(0).arg(-1), key)?;
                (!members.is_empty()).then_some(Value::SortedSet(members))
            }
            KeyType::Hash => {
                let fields: BTreeMap<String, String> =
                    self.query("HGETALL", redis::cmd("HGETALL").arg(key), key)?;
                (!fields.is_empty()).then_some(Value::Hash(fields))
            }
            KeyType::None => None,
            KeyType::Other(name) => {
                return Err(StoreError::UnsupportedType {
                    key: key.to_string(),
                    kind: name.clone(),
                });
            }
        };

        Ok(value)
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Opens a fresh [`RedisStore`] per lookup from a base configuration.
#[derive(Debug, Clone)]
pub struct RedisConnector {
    config: StoreConfig,
}

impl RedisConnector {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

impl StoreConnector for RedisConnector {
    type Store = RedisStore;

    fn connect(&self, options: &LookupOptions) -> StoreResult<RedisStore> {
        RedisStore::connect(&self.config.with_overrides(options))
    }
}
