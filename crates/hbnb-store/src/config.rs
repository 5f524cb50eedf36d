//! Storage configuration
//!
//! The backend is chosen once, at startup, from the process environment
//! (optionally seeded from a `.env` file). Callers may also build a
//! [`StorageConfig`] directly, which is what the tests do.

use std::fmt;
use std::path::PathBuf;

pub const ENV_STORAGE_TYPE: &str = "HBNB_TYPE_STORAGE";
pub const ENV_FILE_PATH: &str = "HBNB_FILE_PATH";
pub const ENV_DB_PATH: &str = "HBNB_DB_PATH";
pub const ENV_MODE: &str = "HBNB_ENV";

pub const DEFAULT_FILE_PATH: &str = "file.json";
pub const DEFAULT_DB_PATH: &str = "hbnb.db";
const MEMORY_TARGET: &str = ":memory:";

/// Which backend sits behind the facade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    File,
    Db,
}

impl BackendKind {
    /// Name used in logs and error context
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::File => "file",
            BackendKind::Db => "db",
        }
    }

    /// `db` selects the relational backend, anything else the file backend
    pub fn from_setting(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("db") {
            BackendKind::Db
        } else {
            BackendKind::File
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the relational engine keeps its data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbTarget {
    Memory,
    Path(PathBuf),
}

impl DbTarget {
    pub fn from_setting(value: &str) -> Self {
        if value == MEMORY_TARGET {
            DbTarget::Memory
        } else {
            DbTarget::Path(PathBuf::from(value))
        }
    }
}

impl Default for DbTarget {
    fn default() -> Self {
        DbTarget::Path(PathBuf::from(DEFAULT_DB_PATH))
    }
}

/// Everything needed to build a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: BackendKind,
    pub file_path: PathBuf,
    pub db_target: DbTarget,
    /// Drop every table on `reload()` (the `HBNB_ENV=test` mode)
    pub drop_on_reload: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::File,
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
            db_target: DbTarget::default(),
            drop_on_reload: false,
        }
    }
}

impl StorageConfig {
    /// File backend persisting to `path`
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: path.into(),
            ..Self::default()
        }
    }

    /// Relational backend on `target`
    pub fn db(target: DbTarget) -> Self {
        Self {
            backend: BackendKind::Db,
            db_target: target,
            ..Self::default()
        }
    }

    pub fn with_drop_on_reload(mut self, drop: bool) -> Self {
        self.drop_on_reload = drop;
        self
    }

    /// Read `.env` (if any) into the environment, then build from it
    pub fn load() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_env()
    }

    /// Build from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = lookup(ENV_STORAGE_TYPE)
            .map(|v| BackendKind::from_setting(&v))
            .unwrap_or_default();
        let file_path = lookup(ENV_FILE_PATH)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_PATH));
        let db_target = lookup(ENV_DB_PATH)
            .filter(|v| !v.is_empty())
            .map(|v| DbTarget::from_setting(&v))
            .unwrap_or_default();
        let drop_on_reload = lookup(ENV_MODE)
            .map(|v| v.trim().eq_ignore_ascii_case("test"))
            .unwrap_or(false);

        Self {
            backend,
            file_path,
            db_target,
            drop_on_reload,
        }
    }
}
