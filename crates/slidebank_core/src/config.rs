//! Process-start configuration for backend selection.
//!
//! # Responsibility
//! - Resolve which persistence adapter the process runs with, once, at
//!   startup.
//! - Keep adapter choice out of core logic; callers construct the chosen
//!   adapter explicitly and inject it into the store.
//!
//! # Invariants
//! - Backend selection never happens via runtime type inspection.
//! - A sqlite selection without a usable database path is a configuration
//!   error, not a fallback to the ephemeral backend.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable naming the backend: `memory` (default) or `sqlite`.
pub const BACKEND_ENV: &str = "SLIDEBANK_BACKEND";

/// Environment variable with the absolute SQLite database file path.
pub const DB_PATH_ENV: &str = "SLIDEBANK_DB_PATH";

/// Which persistence adapter the process runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendKind {
    /// Ephemeral in-process map; data lives for the process lifetime.
    Memory,
    /// Persistent SQLite file database.
    Sqlite(PathBuf),
}

/// Resolved startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: BackendKind,
}

/// Configuration failure at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownBackend(String),
    MissingDbPath,
    RelativeDbPath(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownBackend(value) => {
                write!(f, "unknown backend `{value}`; expected memory|sqlite")
            }
            Self::MissingDbPath => {
                write!(f, "{DB_PATH_ENV} environment variable is required for the sqlite backend")
            }
            Self::RelativeDbPath(path) => write!(
                f,
                "{DB_PATH_ENV} must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

impl StoreConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = std::env::var(BACKEND_ENV).ok();
        let db_path = std::env::var(DB_PATH_ENV).ok();
        Self::from_values(backend.as_deref(), db_path.as_deref())
    }

    /// Resolves configuration from raw values; `None` means unset.
    pub fn from_values(
        backend: Option<&str>,
        db_path: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let backend = match backend.map(str::trim) {
            None | Some("") | Some("memory") => BackendKind::Memory,
            Some("sqlite") => BackendKind::Sqlite(resolve_db_path(db_path)?),
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        Ok(Self { backend })
    }
}

fn resolve_db_path(db_path: Option<&str>) -> Result<PathBuf, ConfigError> {
    let raw = db_path.map(str::trim).filter(|value| !value.is_empty());
    let Some(raw) = raw else {
        return Err(ConfigError::MissingDbPath);
    };

    let path = Path::new(raw);
    if !path.is_absolute() {
        return Err(ConfigError::RelativeDbPath(path.to_path_buf()));
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{BackendKind, ConfigError, StoreConfig};
    use std::path::PathBuf;

    #[test]
    fn defaults_to_memory_backend() {
        let config = StoreConfig::from_values(None, None).unwrap();
        assert_eq!(config.backend, BackendKind::Memory);

        let blank = StoreConfig::from_values(Some("  "), None).unwrap();
        assert_eq!(blank.backend, BackendKind::Memory);
    }

    #[test]
    fn sqlite_requires_absolute_db_path() {
        let config = StoreConfig::from_values(Some("sqlite"), Some("/var/lib/slidebank.db"))
            .unwrap();
        assert_eq!(
            config.backend,
            BackendKind::Sqlite(PathBuf::from("/var/lib/slidebank.db"))
        );

        let missing = StoreConfig::from_values(Some("sqlite"), None).unwrap_err();
        assert_eq!(missing, ConfigError::MissingDbPath);

        let relative = StoreConfig::from_values(Some("sqlite"), Some("data/slides.db"))
            .unwrap_err();
        assert!(matches!(relative, ConfigError::RelativeDbPath(_)));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let err = StoreConfig::from_values(Some("mongo"), None).unwrap_err();
        assert_eq!(err, ConfigError::UnknownBackend("mongo".to_string()));
    }
}
