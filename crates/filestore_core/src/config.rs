//! Store configuration.
//!
//! # Responsibility
//! - Carry the base directory and write policy a store is bound to.
//! - Resolve the default base directory from the environment.
//!
//! # Invariants
//! - The base directory is owned by the config value, never a process global.
//!
//! # See also
//! - `crate::fs::store_file_path` for the file layout under the base directory.

use std::error::Error;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable overriding the default base directory.
pub const BASE_DIR_ENV: &str = "FILESTORE_BASE_DIR";
/// Directory created under the user's home when no override is set.
pub const DEFAULT_BASE_DIR_NAME: &str = "file-database";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    HomeNotFound,
    EmptyBaseDir,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HomeNotFound => write!(
                f,
                "cannot resolve home directory; set {BASE_DIR_ENV} explicitly"
            ),
            Self::EmptyBaseDir => write!(f, "{BASE_DIR_ENV} is set but empty"),
        }
    }
}

impl Error for ConfigError {}

/// Settings a `RecordStore` is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    base_dir: PathBuf,
    durable_writes: bool,
}

impl StoreConfig {
    /// Creates a config rooted at `base_dir` with durable writes enabled.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            durable_writes: true,
        }
    }

    /// Resolves the base directory from `FILESTORE_BASE_DIR`, falling back to
    /// `<home>/file-database`.
    ///
    /// # Errors
    /// - `EmptyBaseDir` when the override is set to an empty string.
    /// - `HomeNotFound` when no override is set and no home directory is known.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(
            std::env::var_os(BASE_DIR_ENV),
            std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")),
        )
    }

    fn resolve(
        override_dir: Option<OsString>,
        home: Option<OsString>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = override_dir {
            if dir.is_empty() {
                return Err(ConfigError::EmptyBaseDir);
            }
            return Ok(Self::new(dir));
        }

        match home {
            Some(home) if !home.is_empty() => {
                Ok(Self::new(PathBuf::from(home).join(DEFAULT_BASE_DIR_NAME)))
            }
            _ => Err(ConfigError::HomeNotFound),
        }
    }

    /// Toggles `fsync` after every store file rewrite.
    pub fn with_durable_writes(mut self, durable: bool) -> Self {
        self.durable_writes = durable;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn durable_writes(&self) -> bool {
        self.durable_writes
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StoreConfig, DEFAULT_BASE_DIR_NAME};
    use std::ffi::OsString;
    use std::path::PathBuf;

    #[test]
    fn new_enables_durable_writes() {
        let config = StoreConfig::new("/tmp/store");
        assert!(config.durable_writes());
        assert!(!config.with_durable_writes(false).durable_writes());
    }

    #[test]
    fn override_takes_precedence_over_home() {
        let config = StoreConfig::resolve(
            Some(OsString::from("/srv/records")),
            Some(OsString::from("/home/alex")),
        )
        .unwrap();
        assert_eq!(config.base_dir(), PathBuf::from("/srv/records"));
    }

    #[test]
    fn home_fallback_uses_default_directory_name() {
        let config = StoreConfig::resolve(None, Some(OsString::from("/home/alex"))).unwrap();
        assert_eq!(
            config.base_dir(),
            PathBuf::from("/home/alex").join(DEFAULT_BASE_DIR_NAME)
        );
    }

    #[test]
    fn unresolvable_locations_are_rejected() {
        assert_eq!(
            StoreConfig::resolve(None, None).unwrap_err(),
            ConfigError::HomeNotFound
        );
        assert_eq!(
            StoreConfig::resolve(Some(OsString::new()), None).unwrap_err(),
            ConfigError::EmptyBaseDir
        );
    }
}
