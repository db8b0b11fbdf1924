//! HTTP server for the contact manager.
//!
//! # Responsibility
//! - Load configuration and logging once per process.
//! - Bootstrap the contacts schema before accepting requests.
//! - Serve the contact routes over axum.

pub mod config;
pub mod http;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

use contact_core::db::{open_db, DbError};
use log::info;

pub use config::{AppConfig, ConfigError};
pub use http::{router, ApiError, AppState};

/// Startup or serve failure of the server process.
#[derive(Debug)]
pub enum ServerError {
    Config(ConfigError),
    Logging(String),
    Db(DbError),
    Io(std::io::Error),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(message) => write!(f, "logging init failed: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(_) => None,
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for ServerError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<DbError> for ServerError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<std::io::Error> for ServerError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Creates the contacts table in the database file once, ahead of request traffic.
pub fn bootstrap_schema(db_path: &Path) -> Result<(), DbError> {
    open_db(db_path)?;
    info!(
        "event=schema_bootstrap module=server status=ok db_path={}",
        db_path.display()
    );
    Ok(())
}

/// Runs the server described by `config` until the listener fails.
pub async fn run(config: AppConfig) -> Result<(), ServerError> {
    contact_core::init_logging(&config.log_level, config.log_dir.as_deref())
        .map_err(ServerError::Logging)?;
    bootstrap_schema(&config.db_path)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        "event=server_start module=server status=ok addr={}",
        listener.local_addr()?
    );
    axum::serve(listener, router(AppState::new(config.db_path))).await?;
    Ok(())
}
