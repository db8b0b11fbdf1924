//! Environment-driven server configuration.
//!
//! # Responsibility
//! - Read connection, bind and logging settings once at process start.
//! - Merge in a `.env` file so deployments can keep settings beside the binary.
//!
//! # Invariants
//! - Process environment wins over `.env` entries for the same key.
//! - Blank variables are treated as unset and fall back to defaults.
//! - Values are validated here, not at first use.

use contact_core::default_log_level;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DB_PATH_VAR: &str = "CONTACTS_DB_PATH";
pub const BIND_ADDR_VAR: &str = "CONTACTS_BIND_ADDR";
pub const LOG_LEVEL_VAR: &str = "CONTACTS_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "CONTACTS_LOG_DIR";

const DEFAULT_DB_PATH: &str = "contacts.sqlite3";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Configuration error raised while reading the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    /// A `.env` file exists but could not be read or parsed.
    EnvFile { path: String, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid value `{value}` for {key}: {reason}")
            }
            Self::EnvFile { path, reason } => write!(f, "failed to load `{path}`: {reason}"),
        }
    }
}

impl Error for ConfigError {}

/// Settings for one server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file holding the `contacts` table.
    pub db_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Absolute directory for rolling log files; stderr when unset.
    pub log_dir: Option<String>,
}

impl AppConfig {
    /// Loads configuration from the process environment, after merging a
    /// `.env` file found in the working directory or its parents.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(err) if err.not_found() => {}
            Err(err) => {
                return Err(ConfigError::EnvFile {
                    path: ".env".to_string(),
                    reason: err.to_string(),
                })
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from a specific `.env` file layered under the
    /// process environment.
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        let env_file_error = |err: dotenvy::Error| ConfigError::EnvFile {
            path: path.display().to_string(),
            reason: err.to_string(),
        };
        let file_values: HashMap<String, String> = dotenvy::from_path_iter(path)
            .map_err(env_file_error)?
            .collect::<Result<_, _>>()
            .map_err(env_file_error)?;

        Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| file_values.get(key).cloned())
        })
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_text = read(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_text
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::InvalidValue {
                key: BIND_ADDR_VAR,
                value: bind_text.clone(),
                reason: err.to_string(),
            })?;

        Ok(Self {
            db_path: PathBuf::from(read(DB_PATH_VAR).unwrap_or_else(|| DEFAULT_DB_PATH.to_string())),
            bind_addr,
            log_level: read(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_VAR),
        })
    }
}
