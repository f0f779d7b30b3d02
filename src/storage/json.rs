//! JSON file-based storage engine.
//!
//! This module provides a simple, human-readable engine using JSON
//! serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - loads entire file into memory on open
//! - **Write**: O(n) - serializes and writes entire dataset
//! - **Best for**: a few thousand records, infrequent writes

use crate::domain::error::{Result, RosterError};
use crate::storage::backend::{Engine, OpenOutcome};
use crate::storage::memory::open_version;
use crate::storage::models::{StorageData, TableSchema};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// JSON file engine.
///
/// The entire dataset is kept in memory and persisted after every mutation.
/// A mutation whose write fails is rolled back in memory, so the in-memory view
/// never runs ahead of the file. Batches are atomic.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "tables": {
///     "employees": {
///       "schema": {
///         "name": "employees",
///         "key_path": "id",
///         "indexes": [{ "name": "email", "key_path": "email", "unique": true }]
///       },
///       "next_key": 3,
///       "rows": {
///         "1": { "id": 1, "firstName": "Ahmet", "email": "ahmet.yilmaz@company.com" },
///         "2": { "id": 2, "firstName": "Ayşe", "email": "ayse.demir@company.com" }
///       }
///     }
///   }
/// }
/// ```
#[derive(Debug)]
pub struct JsonFileEngine {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory data cache, loaded on open.
    data: StorageData,

    /// Whether `open` has succeeded.
    opened: bool,

    /// Tracks if data has been modified since last save.
    dirty: bool,
}

impl JsonFileEngine {
    /// Creates an engine for the given file. Nothing is read until [`Engine::open`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use roster::storage::{Engine, JsonFileEngine};
    ///
    /// let mut engine = JsonFileEngine::new("/tmp/employees.json");
    /// engine.open(1)?;
    /// # Ok::<(), roster::RosterError>(())
    /// ```
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            data: StorageData::default(),
            opened: false,
            dirty: false,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads storage data from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents).map_err(|e| {
            RosterError::StoreUnavailable(format!("failed to parse {}: {e}", path.display()))
        })?;

        tracing::debug!(
            version = data.version,
            tables = data.tables.len(),
            "loaded storage data"
        );

        Ok(data)
    }

    /// Saves storage data to disk using atomic write.
    ///
    /// Writes to a temporary file first, then renames it over the target path.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temporary write or the rename fails.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        tracing::debug!(path = ?self.file_path, "saving storage data");

        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!("storage saved successfully");
        Ok(())
    }

    fn data(&self) -> Result<&StorageData> {
        if self.opened {
            Ok(&self.data)
        } else {
            Err(RosterError::StoreUnavailable("engine is not open".to_string()))
        }
    }

    /// Applies a mutation and persists it, restoring the previous state if either fails.
    fn commit<T>(&mut self, mutate: impl FnOnce(&mut StorageData) -> Result<T>) -> Result<T> {
        if !self.opened {
            return Err(RosterError::StoreUnavailable("engine is not open".to_string()));
        }

        let snapshot = self.data.clone();
        let outcome = mutate(&mut self.data).and_then(|value| {
            self.dirty = true;
            self.save_to_file().map(|()| value)
        });

        if outcome.is_err() {
            self.data = snapshot;
            self.dirty = false;
        }
        outcome
    }
}

impl Engine for JsonFileEngine {
    fn open(&mut self, version: u32) -> Result<OpenOutcome> {
        let _span = tracing::debug_span!("json_open", path = ?self.file_path, version).entered();

        if let Some(parent) = self.file_path.parent() {
            tracing::debug!(parent = ?parent, "creating parent directory");
            std::fs::create_dir_all(parent)?;
        }

        let mut data = if self.file_path.exists() {
            tracing::debug!("loading existing data");
            Self::load_from_file(&self.file_path)?
        } else {
            tracing::debug!("initializing new empty storage");
            StorageData::default()
        };

        let outcome = open_version(&mut data, version)?;
        self.data = data;

        if outcome.needs_upgrade(version) {
            self.dirty = true;
            if let Err(e) = self.save_to_file() {
                self.dirty = false;
                return Err(e);
            }
        }
        self.opened = true;

        tracing::debug!(previous_version = outcome.previous_version, "storage opened");
        Ok(outcome)
    }

    fn has_table(&self, name: &str) -> bool {
        self.data.tables.contains_key(name)
    }

    fn create_table(&mut self, schema: TableSchema) -> Result<()> {
        let _span = tracing::debug_span!("json_create_table", table = %schema.name).entered();
        self.commit(|data| {
            data.create_table(schema);
            Ok(())
        })
    }

    fn insert(&mut self, table: &str, value: Value) -> Result<u64> {
        let _span = tracing::debug_span!("json_insert", table).entered();
        let key = self.commit(|data| data.table_mut(table)?.insert(value))?;
        tracing::debug!(key, "document inserted");
        Ok(key)
    }

    fn supports_atomic_batch(&self) -> bool {
        true
    }

    fn insert_batch(&mut self, table: &str, values: Vec<Value>) -> Result<Vec<Result<u64>>> {
        let _span = tracing::debug_span!("json_insert_batch", table, count = values.len()).entered();
        let keys = self.commit(|data| data.table_mut(table)?.insert_all(values))?;
        tracing::debug!(inserted = keys.len(), "batch inserted");
        Ok(keys.into_iter().map(Ok).collect())
    }

    fn get(&self, table: &str, key: u64) -> Result<Option<Value>> {
        Ok(self.data()?.table(table)?.get(key).cloned())
    }

    fn scan(&self, table: &str) -> Result<Vec<(u64, Value)>> {
        Ok(self.data()?.table(table)?.scan())
    }

    fn replace(&mut self, table: &str, key: u64, value: Value) -> Result<()> {
        let _span = tracing::debug_span!("json_replace", table, key).entered();
        self.commit(|data| data.table_mut(table)?.replace(key, value))
    }

    fn delete(&mut self, table: &str, key: u64) -> Result<()> {
        let _span = tracing::debug_span!("json_delete", table, key).entered();
        let existed = self.data()?.table(table)?.get(key).is_some();
        if !existed {
            tracing::debug!("nothing to delete");
            return Ok(());
        }
        self.commit(|data| {
            data.table_mut(table)?.delete(key);
            Ok(())
        })
    }

    fn clear(&mut self, table: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_clear", table).entered();
        self.commit(|data| {
            data.table_mut(table)?.clear();
            Ok(())
        })
    }
}
