//! Environment-backed store configuration.
//!
//! Most settings have defaults. Override with `HIERA_REDIS_*` environment variables; per-lookup
//! options can override them again through [`StoreConfig::with_overrides`].

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use redis::{ConnectionAddr, ConnectionInfo, IntoConnectionInfo, RedisConnectionInfo, RedisResult};

use crate::constants::{
    DEFAULT_REDIS_DB, DEFAULT_REDIS_HOST, DEFAULT_REDIS_PORT, DEFAULT_SESSION_CAPACITY,
    DEFAULT_TIMEOUT_MS, SUPPORTED_URL_SCHEMES,
};
use crate::options::LookupOptions;

/// Redis connection configuration loaded from environment variables.
///
/// Use [`StoreConfig::from_env`] to read `HIERA_REDIS_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Full connection URL. When set, takes precedence over the discrete fields.
    pub url: Option<String>,

    /// Redis host. Default: `127.0.0.1`.
    pub host: String,

    /// Redis port. Default: `6379`.
    pub port: u16,

    /// Logical database index. Default: `0`.
    pub db: i64,

    /// Password sent with `AUTH`, if any.
    pub password: Option<String>,

    /// Unix socket path. Used instead of host/port when set.
    pub socket_path: Option<PathBuf>,

    /// Connect and read timeout in milliseconds. `0` disables the timeout.
    pub timeout_ms: u64,

    /// Max entries in a lookup session cache. Default: `10_000`.
    pub session_capacity: u64,

    /// Per-lookup fields layered over `url` when one is kept.
    pub url_overrides: UrlOverrides,
}

/// Connection fields that replace the matching parts of a parsed URL.
///
/// `host` and `port` only apply to TCP (plain or TLS) URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub db: Option<i64>,
    pub password: Option<String>,
}

impl UrlOverrides {
    pub fn is_empty(&self) -> bool {
        self.host.is_none() && self.port.is_none() && self.db.is_none() && self.password.is_none()
    }

    fn merge(&mut self, options: &LookupOptions) {
        if options.host.is_some() {
            self.host = options.host.clone();
        }
        if options.port.is_some() {
            self.port = options.port;
        }
        if options.db.is_some() {
            self.db = options.db;
        }
        if options.password.is_some() {
            self.password = options.password.clone();
        }
    }

    fn apply(&self, info: &mut ConnectionInfo) {
        match info.addr {
            ConnectionAddr::Tcp(ref mut host, ref mut port)
            | ConnectionAddr::TcpTls {
                ref mut host,
                ref mut port,
                ..
            } => {
                if let Some(ref h) = self.host {
                    *host = h.clone();
                }
                if let Some(p) = self.port {
                    *port = p;
                }
            }
            _ => {}
        }

        if let Some(db) = self.db {
            info.redis.db = db;
        }
        if let Some(ref password) = self.password {
            info.redis.password = Some(password.clone());
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: DEFAULT_REDIS_HOST.to_string(),
            port: DEFAULT_REDIS_PORT,
            db: DEFAULT_REDIS_DB,
            password: None,
            socket_path: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            session_capacity: DEFAULT_SESSION_CAPACITY,
            url_overrides: UrlOverrides::default(),
        }
    }
}

impl StoreConfig {
    const ENV_URL: &'static str = "HIERA_REDIS_URL";
    const ENV_HOST: &'static str = "HIERA_REDIS_HOST";
    const ENV_PORT: &'static str = "HIERA_REDIS_PORT";
    const ENV_DB: &'static str = "HIERA_REDIS_DB";
    const ENV_PASSWORD: &'static str = "HIERA_REDIS_PASSWORD";
    const ENV_SOCKET: &'static str = "HIERA_REDIS_SOCKET";
    const ENV_TIMEOUT_MS: &'static str = "HIERA_REDIS_TIMEOUT_MS";
    const ENV_SESSION_CAPACITY: &'static str = "HIERA_REDIS_SESSION_CAPACITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let url = Self::parse_optional_string_from_env(Self::ENV_URL);
        let host = Self::parse_string_from_env(Self::ENV_HOST, defaults.host);
        let port = Self::parse_port_from_env(defaults.port)?;
        let db = Self::parse_db_from_env(defaults.db)?;
        let password = Self::parse_optional_string_from_env(Self::ENV_PASSWORD);
        let socket_path = Self::parse_optional_string_from_env(Self::ENV_SOCKET).map(PathBuf::from);
        let timeout_ms = Self::parse_u64_from_env(Self::ENV_TIMEOUT_MS, defaults.timeout_ms);
        let session_capacity =
            Self::parse_u64_from_env(Self::ENV_SESSION_CAPACITY, defaults.session_capacity);

        Ok(Self {
            url,
            host,
            port,
            db,
            password,
            socket_path,
            timeout_ms,
            session_capacity,
            url_overrides: UrlOverrides::default(),
        })
    }

    /// Validates the URL scheme and socket path (does not connect).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.url {
            if !SUPPORTED_URL_SCHEMES
                .iter()
                .any(|scheme| url.starts_with(scheme))
            {
                return Err(ConfigError::UnsupportedUrl { url: url.clone() });
            }
        }

        if let Some(ref path) = self.socket_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if path.is_dir() {
                return Err(ConfigError::IsADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns a copy with the connection settings from `options` applied.
    ///
    /// A `url` or `socket` option replaces the configured URL outright. Otherwise a configured
    /// URL keeps its endpoint and only the overridden fields (`host`, `port`, `db`,
    /// `password`) change.
    pub fn with_overrides(&self, options: &LookupOptions) -> Self {
        let mut config = self.clone();

        if options.url.is_some() || options.socket.is_some() {
            config.url = options.url.clone();
            config.url_overrides = UrlOverrides::default();
        }
        if let Some(ref host) = options.host {
            config.host = host.clone();
        }
        if let Some(port) = options.port {
            config.port = port;
        }
        if let Some(db) = options.db {
            config.db = db;
        }
        if let Some(ref password) = options.password {
            config.password = Some(password.clone());
        }
        if let Some(ref socket) = options.socket {
            config.socket_path = Some(socket.clone());
        }

        if config.url.is_some() {
            config.url_overrides.merge(options);
        }

        config
    }

    /// Builds the Redis client connection info for this configuration.
    pub fn connection_info(&self) -> RedisResult<ConnectionInfo> {
        if let Some(ref url) = self.url {
            let mut info = url.as_str().into_connection_info()?;
            self.url_overrides.apply(&mut info);
            return Ok(info);
        }

        let addr = match self.socket_path {
            Some(ref path) => ConnectionAddr::Unix(path.clone()),
            None => ConnectionAddr::Tcp(self.host.clone(), self.port),
        };

        Ok(ConnectionInfo {
            addr,
            redis: RedisConnectionInfo {
                db: self.db,
                password: self.password.clone(),
                ..Default::default()
            },
        })
    }

    /// Returns the configured timeout, or `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    /// Returns a human-readable endpoint for logging.
    ///
    /// Rendered from [`StoreConfig::connection_info`], so credentials never appear, whether
    /// they came from the userinfo or the query string of a URL.
    pub fn endpoint(&self) -> String {
        match self.connection_info() {
            Ok(info) => describe_endpoint(&info),
            Err(_) => "<invalid url>".to_string(),
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_db_from_env(default: i64) -> Result<i64, ConfigError> {
        match env::var(Self::ENV_DB) {
            Ok(value) => match value.trim().parse::<i64>() {
                Ok(db) if db >= 0 => Ok(db),
                _ => Err(ConfigError::InvalidDb { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        Self::parse_optional_string_from_env(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}

/// Formats an endpoint as `host:port/db`, `tls:host:port/db` or `unix:path?db=N`.
fn describe_endpoint(info: &ConnectionInfo) -> String {
    let db = info.redis.db;
    match info.addr {
        ConnectionAddr::Tcp(ref host, port) => format!("{host}:{port}/{db}"),
        ConnectionAddr::TcpTls { ref host, port, .. } => format!("tls:{host}:{port}/{db}"),
        ConnectionAddr::Unix(ref path) => format!("unix:{}?db={db}", path.display()),
        #[allow(unreachable_patterns)]
        _ => format!("{:?}/{db}", info.addr),
    }
}
