//! Environment configuration for the HTTP server.
//!
//! # Invariants
//! - Configuration is read once at startup.
//! - Blank variables fall back to defaults; malformed ones fail startup and
//!   name the offending variable.

use contacts_core::db::{open_db, open_db_in_memory, DbResult};
use contacts_core::{default_log_level, normalize_log_level};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const BIND_ENV: &str = "CONTACTS_BIND";
pub const DB_PATH_ENV: &str = "CONTACTS_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "CONTACTS_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "CONTACTS_LOG_DIR";

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_DB_FILE_NAME: &str = "contacts.sqlite3";
const IN_MEMORY_DB: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub message: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.variable, self.message)
    }
}

impl Error for ConfigError {}

/// Where the contact table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    Memory,
}

impl DatabaseLocation {
    /// Opens and migrates the database.
    pub fn open(&self) -> DbResult<Connection> {
        match self {
            Self::File(path) => open_db(path),
            Self::Memory => open_db_in_memory(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database: DatabaseLocation,
    pub log_level: &'static str,
    /// `None` logs to stderr.
    pub log_dir: Option<String>,
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_raw = non_blank(BIND_ENV).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|err| ConfigError {
            variable: BIND_ENV,
            message: format!("`{bind_raw}` is not a socket address: {err}"),
        })?;

        let database = match non_blank(DB_PATH_ENV) {
            Some(path) if path == IN_MEMORY_DB => DatabaseLocation::Memory,
            Some(path) => DatabaseLocation::File(PathBuf::from(path)),
            None => DatabaseLocation::File(PathBuf::from(DEFAULT_DB_FILE_NAME)),
        };

        let log_level = match non_blank(LOG_LEVEL_ENV) {
            Some(level) => normalize_log_level(&level).map_err(|message| ConfigError {
                variable: LOG_LEVEL_ENV,
                message,
            })?,
            None => default_log_level(),
        };

        Ok(Self {
            bind_addr,
            database,
            log_level,
            log_dir: non_blank(LOG_DIR_ENV),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DatabaseLocation, ServerConfig, BIND_ENV, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV,
    };
    use contacts_core::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, super::ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).expect("defaults should be valid");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(
            config.database,
            DatabaseLocation::File(PathBuf::from("contacts.sqlite3"))
        );
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_from(&[(BIND_ENV, "  "), (LOG_DIR_ENV, "")]).expect("valid");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn explicit_values_are_used() {
        let config = config_from(&[
            (BIND_ENV, "0.0.0.0:8080"),
            (DB_PATH_ENV, ":memory:"),
            (LOG_LEVEL_ENV, "WARNING"),
            (LOG_DIR_ENV, "/var/log/contacts"),
        ])
        .expect("valid");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.database, DatabaseLocation::Memory);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/contacts"));
    }

    #[test]
    fn malformed_bind_address_names_the_variable() {
        let err = config_from(&[(BIND_ENV, "localhost")]).expect_err("must fail");
        assert_eq!(err.variable, BIND_ENV);
        assert!(err.to_string().contains("CONTACTS_BIND"));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = config_from(&[(LOG_LEVEL_ENV, "loud")]).expect_err("must fail");
        assert_eq!(err.variable, LOG_LEVEL_ENV);
    }

    #[test]
    fn memory_location_opens_migrated_database() {
        let conn = DatabaseLocation::Memory.open().expect("open in-memory db");
        assert!(contacts_core::SqliteContactRepository::try_new(&conn).is_ok());
    }
}
