//! Filesystem adapter used by record stores.
//!
//! # Responsibility
//! - Provide the primitive file operations a store needs.
//! - Map an entity name to its store file path.
//!
//! # Invariants
//! - `write` replaces the whole file content; it never appends.
//! - No locking and no atomic-rename guarantees are provided here.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const STORE_FILE_EXTENSION: &str = "json";

/// Primitive file operations behind a record store.
pub trait FileSystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
    /// Overwrites `path` with `contents`, creating it when missing.
    ///
    /// With `durable` set the call returns only after data reached the device.
    fn write(&self, path: &Path, contents: &[u8], durable: bool) -> io::Result<()>;
}

/// `std::fs` backed adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8], durable: bool) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            // Why: a shorter collection must not leave stale bytes past the new end.
            .truncate(true)
            .open(path)?;
        file.write_all(contents)?;
        if durable {
            file.sync_all()?;
        }
        Ok(())
    }
}

/// Returns `<base_dir>/<entity_name>.json`.
pub fn store_file_path(base_dir: &Path, entity_name: &str) -> PathBuf {
    base_dir.join(format!("{entity_name}.{STORE_FILE_EXTENSION}"))
}
