//! Opt-in exclusive access to a store file within one process.
//!
//! # Invariants
//! - One mutex per store file, shared by every `RecordStore` bound to it.
//!   The key does not depend on whether the file exists yet.
//! - Not reentrant: nesting `with_exclusive` on the same file deadlocks.
//! - Other processes are not excluded.
//!
//! # See also
//! - `crate::repo::record_repo` for the unsynchronized default operations.

use crate::fs::FileSystem;
use crate::model::entity::Entity;
use crate::repo::record_repo::RecordStore;
use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

static STORE_LOCKS: Lazy<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Builds the registry key for a store file.
///
/// The parent directory is canonicalized when it exists; otherwise the
/// path is made absolute without touching the filesystem.
fn lock_key(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let parent = std::fs::canonicalize(parent)
        .or_else(|_| std::path::absolute(parent))
        .unwrap_or_else(|_| parent.to_path_buf());
    match path.file_name() {
        Some(name) => parent.join(name),
        None => parent,
    }
}

fn lock_for(path: &Path) -> Arc<Mutex<()>> {
    let key = lock_key(path);
    let mut locks = STORE_LOCKS.lock().unwrap_or_else(PoisonError::into_inner);
    // Why: entries nobody else holds are dropped so the registry tracks live scopes only.
    locks.retain(|existing, lock| existing == &key || Arc::strong_count(lock) > 1);
    Arc::clone(locks.entry(key).or_default())
}

impl<T: Entity, F: FileSystem> RecordStore<T, F> {
    /// Runs `f` while holding the process-wide lock for this store's file.
    ///
    /// Makes a read-modify-write sequence issued through `f` atomic with
    /// respect to other `with_exclusive` callers on the same file. Plain
    /// calls outside this scope are not blocked. A panic inside an earlier
    /// scope does not block later ones.
    pub fn with_exclusive<R>(&self, f: impl FnOnce(&Self) -> R) -> R {
        let lock = lock_for(self.path());
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        debug!(
            "event=store_exclusive module=repo status=acquired entity={}",
            T::ENTITY_NAME
        );
        f(self)
    }
}
