//! Application configuration loaded once at startup from a YAML file.
//!
//! | Env Var          | Default      | Effect                                   |
//! |------------------|--------------|------------------------------------------|
//! | `BUBBLE_CONFIG`  | `config.yml` | Path of the YAML config file             |
//! | `REDIS_PASSWORD` | --           | Replaces `redis.password` when non-empty |
//!
//! The loaded [`AppConfig`] is immutable; the server wraps it in an `Arc`
//! and hands it to every handler.

use std::collections::HashSet;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::command::{self, CommandDefinition};
use crate::error::CoreError;

/// Env var naming the config file path.
pub const CONFIG_PATH_ENV: &str = "BUBBLE_CONFIG";
/// Env var overriding the Redis password from the file.
pub const REDIS_PASSWORD_ENV: &str = "REDIS_PASSWORD";
/// Config file used when `BUBBLE_CONFIG` is unset or empty.
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";
/// Listen port used when `server.port` is absent.
pub const DEFAULT_PORT: &str = "8080";
/// Queue list used when `redis.list_name` is absent.
pub const DEFAULT_LIST_NAME: &str = "poppit:notifications";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration: queue connection, HTTP server and buttons.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub redis: RedisSettings,
    #[serde(default)]
    pub server: ServerSettings,
    /// Commands in display order.
    #[serde(default)]
    pub commands: Vec<CommandDefinition>,
}

/// Connection details for the Redis list Poppit consumes.
#[derive(Clone, Default, Deserialize)]
pub struct RedisSettings {
    /// `host:port` or a full `redis://` URL.
    #[serde(default)]
    pub addr: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub list_name: String,
}

// Keeps the credential out of log lines.
impl fmt::Debug for RedisSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() {
            "<empty>"
        } else {
            "<redacted>"
        };
        f.debug_struct("RedisSettings")
            .field("addr", &self.addr)
            .field("password", &password)
            .field("list_name", &self.list_name)
            .finish()
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    /// Kept as text so both `port: 8080` and `port: "8080"` are accepted.
    #[serde(default, deserialize_with = "port_from_scalar")]
    pub port: String,
    /// Per-request timeout; requests exceeding it get 408.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Upper bound on connection draining after a shutdown signal.
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: String::new(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        }
    }
}

impl ServerSettings {
    /// Resolve `host` and `port` into a bindable socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, CoreError> {
        let invalid = |reason: String| CoreError::InvalidListenAddress {
            addr: format!("{}:{}", self.host, self.port),
            reason,
        };

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| invalid(format!("host: {e}")))?;
        let port: u16 = self
            .port
            .parse()
            .map_err(|e| invalid(format!("port: {e}")))?;

        Ok(SocketAddr::new(ip, port))
    }
}

impl AppConfig {
    /// Load configuration using the `BUBBLE_CONFIG` and `REDIS_PASSWORD`
    /// environment variables.
    pub fn from_env() -> Result<Self, CoreError> {
        let path = config_path();
        let password_override = non_empty_env(REDIS_PASSWORD_ENV);

        Self::load(&path, password_override)
    }

    /// Read and parse the config file at `path`, then apply defaults and
    /// the optional password override.
    pub fn load(path: &Path, password_override: Option<String>) -> Result<Self, CoreError> {
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_yaml_str(&text).map_err(|source| CoreError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(password) = password_override.filter(|p| !p.is_empty()) {
            config.redis.password = password;
        }

        config.warn_on_duplicate_names();

        tracing::debug!(
            path = %path.display(),
            commands = config.commands.len(),
            "Loaded configuration"
        );

        Ok(config)
    }

    /// Parse YAML text and apply defaults. No environment lookups.
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        let mut config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.apply_defaults();
        Ok(config)
    }

    /// First command whose name matches exactly.
    pub fn find_command(&self, name: &str) -> Option<&CommandDefinition> {
        command::find_by_name(&self.commands, name)
    }

    fn apply_defaults(&mut self) {
        if self.server.port.is_empty() {
            self.server.port = DEFAULT_PORT.to_string();
        }
        if self.redis.list_name.is_empty() {
            self.redis.list_name = DEFAULT_LIST_NAME.to_string();
        }
    }

    // Names are not required to be unique; lookups take the first match.
    fn warn_on_duplicate_names(&self) {
        let mut seen = HashSet::new();
        for def in &self.commands {
            if !seen.insert(def.name.as_str()) {
                tracing::warn!(
                    name = %def.name,
                    "Duplicate command name; only the first definition is reachable"
                );
            }
        }
    }
}

/// Config file path from `BUBBLE_CONFIG`, or [`DEFAULT_CONFIG_PATH`] when
/// unset or empty.
pub fn config_path() -> PathBuf {
    non_empty_env(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_shutdown_timeout_secs() -> u64 {
    DEFAULT_SHUTDOWN_TIMEOUT_SECS
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortScalar {
    Text(String),
    Number(u64),
}

fn port_from_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<PortScalar>::deserialize(deserializer)? {
        Some(PortScalar::Text(text)) => text,
        Some(PortScalar::Number(n)) => n.to_string(),
        None => String::new(),
    })
}
