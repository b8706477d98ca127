//! Service configuration.
//!
//! Values come from an optional YAML file named by `CONFIG_PATH`, then
//! environment overrides, then defaults. Database settings and the token
//! secret have no defaults; every missing one is reported in a single
//! error so operators can fix them all at once.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use super::{DbConfig, Sensitive};

pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";

pub const DEFAULT_ALIAS_LENGTH: usize = 7;
pub const MAX_ALIAS_LENGTH: usize = 64;
const DEFAULT_HTTP_ADDRESS: &str = "localhost:8080";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(4);
const DEFAULT_HTTP_IDLE_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_SSO_ADDRESS: &str = "localhost:44044";
const DEFAULT_SSO_TIMEOUT: Duration = Duration::from_secs(4);
const DEFAULT_SSO_RETRIES: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("missing required config values: {}", .0.join(", "))]
    Missing(Vec<String>),
    #[error("invalid config value {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Local,
    #[default]
    Dev,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }

    /// Debug-level logging is on outside production
    pub fn is_debug(&self) -> bool {
        !matches!(self, Environment::Prod)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Environment::Local),
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(ConfigError::Invalid {
                key: "env",
                reason: format!("expected one of local, dev, prod; got '{other}'"),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig {
    pub address: String,
    /// Budget for reading a request from the client
    pub timeout: Duration,
    /// Keep-alive for idle connections
    pub idle_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsoConfig {
    pub address: String,
    /// Per-attempt deadline
    pub timeout: Duration,
    /// Total attempts per call, first one included
    pub retries_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub env: Environment,
    pub alias_length: usize,
    pub http_server: HttpServerConfig,
    pub db: DbConfig,
    pub sso: SsoConfig,
    pub jwt_secret: Sensitive,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    env: Option<String>,
    alias_length: Option<usize>,
    http_server: RawHttpServer,
    db: RawDb,
    sso_grpc_api: RawSso,
    app: RawApp,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawHttpServer {
    address: Option<String>,
    timeout: Option<String>,
    idle_timeout: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDb {
    host: Option<String>,
    port: Option<u16>,
    user: Option<String>,
    password: Option<String>,
    db: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSso {
    address: Option<String>,
    timeout: Option<String>,
    retries_count: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawApp {
    secret: Option<String>,
}

impl AppConfig {
    /// Load from `CONFIG_PATH` (if set) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let raw = match env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => read_file(Path::new(&path))?,
            _ => RawConfig::default(),
        };
        Self::from_raw(raw, |key| env::var(key).ok())
    }

    /// Build from YAML text and an explicit variable lookup.
    pub fn from_sources<F>(yaml: Option<&str>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = match yaml {
            Some(text) => parse_yaml(text, "inline yaml")?,
            None => RawConfig::default(),
        };
        Self::from_raw(raw, lookup)
    }

    fn from_raw<F>(mut raw: RawConfig, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = var("POSTGRES_HOST") {
            raw.db.host = Some(v);
        }
        if let Some(v) = var("POSTGRES_PORT") {
            let port = v.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "db.port",
                reason: format!("POSTGRES_PORT '{v}': {e}"),
            })?;
            raw.db.port = Some(port);
        }
        if let Some(v) = var("POSTGRES_USER") {
            raw.db.user = Some(v);
        }
        if let Some(v) = var("POSTGRES_PASSWORD") {
            raw.db.password = Some(v);
        }
        if let Some(v) = var("POSTGRES_DB") {
            raw.db.db = Some(v);
        }
        if let Some(v) = var("JWT_SECRET") {
            raw.app.secret = Some(v);
        }

        let mut missing = Vec::new();
        let mut require = |value: Option<String>, name: &str| -> String {
            match value.filter(|v| !v.is_empty()) {
                Some(v) => v,
                None => {
                    missing.push(name.to_string());
                    String::new()
                }
            }
        };
        let host = require(raw.db.host, "db.host (POSTGRES_HOST)");
        let user = require(raw.db.user, "db.user (POSTGRES_USER)");
        let password = require(raw.db.password, "db.password (POSTGRES_PASSWORD)");
        let name = require(raw.db.db, "db.db (POSTGRES_DB)");
        let secret = require(raw.app.secret, "app.secret (JWT_SECRET)");
        if raw.db.port.is_none() {
            missing.push("db.port (POSTGRES_PORT)".to_string());
        }
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let env = match raw.env {
            Some(value) => value.parse()?,
            None => Environment::default(),
        };

        let alias_length = raw.alias_length.unwrap_or(DEFAULT_ALIAS_LENGTH);
        if !(1..=MAX_ALIAS_LENGTH).contains(&alias_length) {
            return Err(ConfigError::Invalid {
                key: "alias_length",
                reason: format!("must be between 1 and {MAX_ALIAS_LENGTH}, got {alias_length}"),
            });
        }

        let retries_count = raw.sso_grpc_api.retries_count.unwrap_or(DEFAULT_SSO_RETRIES);
        if retries_count == 0 {
            return Err(ConfigError::Invalid {
                key: "sso_grpc_api.retries_count",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            env,
            alias_length,
            http_server: HttpServerConfig {
                address: raw
                    .http_server
                    .address
                    .unwrap_or_else(|| DEFAULT_HTTP_ADDRESS.to_string()),
                timeout: duration_or(
                    raw.http_server.timeout,
                    "http_server.timeout",
                    DEFAULT_HTTP_TIMEOUT,
                )?,
                idle_timeout: duration_or(
                    raw.http_server.idle_timeout,
                    "http_server.idle_timeout",
                    DEFAULT_HTTP_IDLE_TIMEOUT,
                )?,
            },
            db: DbConfig {
                host,
                port: raw.db.port.unwrap_or_default(),
                user,
                password: Sensitive::new(password),
                name,
            },
            sso: SsoConfig {
                address: raw
                    .sso_grpc_api
                    .address
                    .unwrap_or_else(|| DEFAULT_SSO_ADDRESS.to_string()),
                timeout: duration_or(
                    raw.sso_grpc_api.timeout,
                    "sso_grpc_api.timeout",
                    DEFAULT_SSO_TIMEOUT,
                )?,
                retries_count,
            },
            jwt_secret: Sensitive::new(secret),
        })
    }
}

fn read_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_yaml(&text, &path.display().to_string())
}

fn parse_yaml(text: &str, origin: &str) -> Result<RawConfig, ConfigError> {
    // An empty document deserializes as unit, not as an empty mapping.
    if text.trim().is_empty() {
        return Ok(RawConfig::default());
    }
    serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
        origin: origin.to_string(),
        source,
    })
}

fn duration_or(
    value: Option<String>,
    key: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match value {
        None => Ok(default),
        Some(text) => humantime::parse_duration(text.trim()).map_err(|e| ConfigError::Invalid {
            key,
            reason: format!("'{text}': {e}"),
        }),
    }
}
