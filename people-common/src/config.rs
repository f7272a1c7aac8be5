//! Configuration loading and resolution
//!
//! Every setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`PEOPLE_*`)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

pub const ENV_HOST: &str = "PEOPLE_HOST";
pub const ENV_PORT: &str = "PEOPLE_PORT";
pub const ENV_BACKEND: &str = "PEOPLE_BACKEND";
pub const ENV_DB_PATH: &str = "PEOPLE_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "PEOPLE_LOG_LEVEL";
pub const ENV_CONFIG: &str = "PEOPLE_CONFIG";

/// Configuration loading or validation error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Memory,
    Sqlite,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Backend::Memory),
            "sqlite" => Ok(Backend::Sqlite),
            _ => Err(ConfigError::InvalidValue {
                key: "backend",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Memory => write!(f, "memory"),
            Backend::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Settings as written in the TOML config file (all optional)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub backend: Option<Backend>,
    pub db_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Load a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Settings given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub backend: Option<Backend>,
    pub db_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub config_file: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub backend: Backend,
    pub db_path: PathBuf,
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            backend: Backend::Memory,
            db_path: default_db_path(),
            log_level: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Resolve configuration from CLI overrides, environment, TOML file and defaults
    ///
    /// An explicitly named config file (CLI or `PEOPLE_CONFIG`) must exist.
    /// The platform default locations are optional.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let explicit_file = overrides
            .config_file
            .clone()
            .or_else(|| std::env::var(ENV_CONFIG).ok().map(PathBuf::from));

        let file = match explicit_file {
            Some(path) => TomlConfig::load(&path)?,
            None => match default_config_file() {
                Some(path) => TomlConfig::load(&path)?,
                None => {
                    debug!("No config file found, using defaults");
                    TomlConfig::default()
                }
            },
        };

        Self::merge(overrides, file)
    }

    fn merge(overrides: ConfigOverrides, file: TomlConfig) -> Result<Self, ConfigError> {
        let defaults = ServiceConfig::default();

        let host = overrides
            .host
            .or_else(|| env_string(ENV_HOST))
            .or(file.host)
            .unwrap_or(defaults.host);

        let port = match overrides.port {
            Some(port) => port,
            None => match env_string(ENV_PORT) {
                Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "port",
                    value: raw,
                })?,
                None => file.port.unwrap_or(defaults.port),
            },
        };

        let backend = match overrides.backend {
            Some(backend) => backend,
            None => match env_string(ENV_BACKEND) {
                Some(raw) => raw.parse()?,
                None => file.backend.unwrap_or(defaults.backend),
            },
        };

        let db_path = overrides
            .db_path
            .or_else(|| env_string(ENV_DB_PATH).map(PathBuf::from))
            .or(file.db_path)
            .unwrap_or(defaults.db_path);

        let log_level = overrides
            .log_level
            .or_else(|| env_string(ENV_LOG_LEVEL))
            .or(file.log_level)
            .unwrap_or(defaults.log_level);

        Ok(Self {
            host,
            port,
            backend,
            db_path,
            log_level,
        })
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// First existing config file: ~/.config/people/config.toml, then /etc/people/config.toml
fn default_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("people").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    let system_config = PathBuf::from("/etc/people/config.toml");
    if cfg!(unix) && system_config.exists() {
        return Some(system_config);
    }

    None
}

/// OS-dependent default database location
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("people"))
        .unwrap_or_else(|| PathBuf::from("./people"))
        .join("people.db")
}
