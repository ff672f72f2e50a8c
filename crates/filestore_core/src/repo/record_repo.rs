//! Record repository contract and JSON file implementation.
//!
//! # Responsibility
//! - Provide CRUD over one entity type's store file.
//! - Keep file layout and encoding details inside the persistence boundary.
//!
//! # Invariants
//! - Every mutation reads the whole collection, edits it in memory and
//!   rewrites the whole file. Nothing is cached between calls.
//! - `save` logs and ignores a blank identifier; `save_all`, `find_by_id`
//!   and `delete_by_id` return an error for invalid input.
//! - I/O and decode failures are logged and absorbed, never returned. A
//!   mutation whose snapshot cannot be read writes nothing.
//!
//! # See also
//! - `crate::repo::exclusive` for serializing read-modify-write cycles.

use crate::codec::{decode_collection, encode_collection, EMPTY_COLLECTION};
use crate::config::StoreConfig;
use crate::fs::{store_file_path, FileSystem, StdFileSystem};
use crate::model::entity::{Entity, Identifier};
use crate::repo::error::{StoreError, StoreResult};
use log::{debug, error, info, warn};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Repository interface for whole-collection CRUD over one entity type.
pub trait RecordRepository<T: Entity> {
    /// Inserts `entity`, or replaces the first structurally equal element.
    ///
    /// A blank identifier is logged and the call does nothing. So is an
    /// unreadable store file.
    fn save(&self, entity: &T);

    /// Appends every entity as-is, without deduplication.
    ///
    /// Nothing is written when the current file cannot be read.
    ///
    /// # Errors
    /// - `StoreError::EmptyBatch` when `entities` is empty.
    fn save_all(&self, entities: &[T]) -> StoreResult<()>;

    /// Returns the stored collection, or an empty one when it cannot be read.
    fn find_all(&self) -> Vec<T>;

    /// Returns the first entity whose identifier equals `id`.
    ///
    /// # Errors
    /// - `StoreError::MissingId` when `id` is missing (`None`).
    fn find_by_id(&self, id: &T::Id) -> StoreResult<Option<T>>;

    /// Removes the first entity whose identifier equals `id`.
    ///
    /// The file is rewritten even when nothing matched.
    ///
    /// # Errors
    /// - `StoreError::MissingId` when `id` is missing (`None`).
    fn delete_by_id(&self, id: &T::Id) -> StoreResult<()>;
}

/// JSON-file-backed store for entity type `T`.
///
/// Owns exactly one file, `<base_dir>/<T::ENTITY_NAME>.json`.
///
/// # Concurrency
/// Operations are plain read-modify-write cycles with no locking. Two
/// writers racing on the same file (threads or processes) can lose updates.
/// Use [`RecordStore::with_exclusive`] or serialize access externally.
pub struct RecordStore<T: Entity, F: FileSystem = StdFileSystem> {
    config: StoreConfig,
    path: PathBuf,
    fs: F,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> RecordStore<T> {
    /// Creates a store on the local filesystem and bootstraps its file.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_file_system(config, StdFileSystem)
    }
}

impl<T: Entity, F: FileSystem> RecordStore<T, F> {
    /// Creates a store over a custom filesystem adapter and bootstraps it.
    pub fn with_file_system(config: StoreConfig, fs: F) -> Self {
        let path = store_file_path(config.base_dir(), T::ENTITY_NAME);
        let store = Self {
            config,
            path,
            fs,
            _entity: PhantomData,
        };
        store.bootstrap();
        store
    }

    /// Ensures the base directory and the store file exist.
    ///
    /// An existing file is left untouched; a missing one is created as `[]`.
    /// Failures are logged as warnings. Later calls then fail individually.
    pub fn bootstrap(&self) {
        let base_dir = self.config.base_dir();
        if let Err(err) = self.fs.create_dir_all(base_dir) {
            warn!(
                "event=store_bootstrap module=repo status=error entity={} error_code=create_dir_failed dir={} error={}",
                T::ENTITY_NAME,
                base_dir.display(),
                err
            );
        }

        if self.fs.exists(&self.path) {
            debug!(
                "event=store_bootstrap module=repo status=ok entity={} created=false",
                T::ENTITY_NAME
            );
            return;
        }

        match self
            .fs
            .write(&self.path, EMPTY_COLLECTION, self.config.durable_writes())
        {
            Ok(()) => info!(
                "event=store_bootstrap module=repo status=ok entity={} created=true path={}",
                T::ENTITY_NAME,
                self.path.display()
            ),
            Err(err) => warn!(
                "event=store_bootstrap module=repo status=error entity={} error_code=create_file_failed path={} error={}",
                T::ENTITY_NAME,
                self.path.display(),
                err
            ),
        }
    }

    /// Path of the backing store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn read_snapshot(&self) -> StoreResult<Vec<T>> {
        let bytes = self.fs.read(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(decode_collection(&bytes)?)
    }

    fn write_snapshot(&self, entities: &[T]) -> StoreResult<()> {
        let bytes = encode_collection(entities)?;
        self.fs
            .write(&self.path, &bytes, self.config.durable_writes())
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })
    }

    /// Rewrites the store file, logging instead of returning failures.
    fn persist(&self, entities: &[T], operation: &str) {
        let started_at = Instant::now();
        match self.write_snapshot(entities) {
            Ok(()) => debug!(
                "event={} module=repo status=ok entity={} count={} duration_ms={}",
                operation,
                T::ENTITY_NAME,
                entities.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event={} module=repo status=error entity={} error_code={} error={}",
                operation,
                T::ENTITY_NAME,
                err.code(),
                err
            ),
        }
    }

    /// Reads the snapshot a mutation edits.
    ///
    /// Returns `None` after logging when the file cannot be read or decoded,
    /// in which case the caller must not write.
    fn snapshot_for_update(&self, operation: &str) -> Option<Vec<T>> {
        match self.read_snapshot() {
            Ok(all) => Some(all),
            Err(err) => {
                error!(
                    "event={} module=repo status=error entity={} error_code={} error={} persisted=false",
                    operation,
                    T::ENTITY_NAME,
                    err.code(),
                    err
                );
                None
            }
        }
    }

    fn reject_missing_id(&self, id: &T::Id, operation: &str) -> StoreResult<()> {
        if id.is_missing() {
            error!(
                "event={} module=repo status=error entity={} error_code=missing_id",
                operation,
                T::ENTITY_NAME
            );
            return Err(StoreError::MissingId);
        }
        Ok(())
    }
}

impl<T: Entity, F: FileSystem> RecordRepository<T> for RecordStore<T, F> {
    fn save(&self, entity: &T) {
        if !entity.has_identifier() {
            error!(
                "event=store_save module=repo status=error entity={} error_code=missing_id",
                T::ENTITY_NAME
            );
            return;
        }

        let Some(mut all) = self.snapshot_for_update("store_save") else {
            return;
        };
        match all.iter().position(|existing| existing == entity) {
            Some(index) => all[index] = entity.clone(),
            None => all.push(entity.clone()),
        }
        self.persist(&all, "store_save");
    }

    fn save_all(&self, entities: &[T]) -> StoreResult<()> {
        if entities.is_empty() {
            error!(
                "event=store_save_all module=repo status=error entity={} error_code=empty_batch",
                T::ENTITY_NAME
            );
            return Err(StoreError::EmptyBatch);
        }

        let Some(mut all) = self.snapshot_for_update("store_save_all") else {
            return Ok(());
        };
        all.extend_from_slice(entities);
        self.persist(&all, "store_save_all");
        Ok(())
    }

    fn find_all(&self) -> Vec<T> {
        match self.read_snapshot() {
            Ok(all) => all,
            Err(err) => {
                error!(
                    "event=store_find_all module=repo status=error entity={} error_code={} error={}",
                    T::ENTITY_NAME,
                    err.code(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn find_by_id(&self, id: &T::Id) -> StoreResult<Option<T>> {
        self.reject_missing_id(id, "store_find_by_id")?;

        Ok(self.find_all().into_iter().find(|entity| entity.id() == id))
    }

    fn delete_by_id(&self, id: &T::Id) -> StoreResult<()> {
        self.reject_missing_id(id, "store_delete_by_id")?;

        let Some(mut all) = self.snapshot_for_update("store_delete_by_id") else {
            return Ok(());
        };
        if let Some(index) = all.iter().position(|entity| entity.id() == id) {
            all.remove(index);
        }
        self.persist(&all, "store_delete_by_id");
        Ok(())
    }
}
