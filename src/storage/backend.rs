//! Embedded engine abstraction.
//!
//! This module defines the [`Engine`] trait that abstracts over the local
//! key-value database holding the records. An engine manages named tables of
//! JSON documents with auto-incrementing integer keys and unique secondary
//! indexes; it knows nothing about employees.
//!
//! # Design Philosophy
//!
//! Engine calls are synchronous and cheap. The [`RecordStore`] wraps an engine
//! behind an async mutex and exposes the async record operations; engines only
//! need to implement the table primitives below.
//!
//! [`RecordStore`]: crate::storage::RecordStore

use crate::domain::error::Result;
use crate::storage::models::TableSchema;
use serde_json::Value;

/// Result of opening an engine at a schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOutcome {
    /// Version found before opening; `0` for a brand-new database.
    pub previous_version: u32,
}

impl OpenOutcome {
    /// Whether the caller must run its upgrade hook to reach `version`.
    #[must_use]
    pub const fn needs_upgrade(self, version: u32) -> bool {
        self.previous_version < version
    }
}

/// Abstraction over embedded key-value engines.
///
/// # Implementations
///
/// - [`MemoryEngine`]: process-local, lost on drop
/// - [`JsonFileEngine`]: JSON file with atomic writes
///
/// [`MemoryEngine`]: crate::storage::MemoryEngine
/// [`JsonFileEngine`]: crate::storage::JsonFileEngine
pub trait Engine: Send {
    /// Opens the database and records `version` as its schema version.
    ///
    /// Every other method may fail with `StoreUnavailable` before this succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the backing storage cannot be opened or
    /// already holds a newer version.
    fn open(&mut self, version: u32) -> Result<OpenOutcome>;

    /// Whether a table with this name exists.
    fn has_table(&self, name: &str) -> bool;

    /// Creates a table. Creating an existing table is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the engine is closed or cannot persist.
    fn create_table(&mut self, schema: TableSchema) -> Result<()>;

    /// Inserts a document and returns its assigned key.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` on a unique index violation, `InvalidInput` for a
    /// malformed document, `StoreUnavailable` for engine failures.
    fn insert(&mut self, table: &str, value: Value) -> Result<u64>;

    /// Whether [`Engine::insert_batch`] is all-or-nothing.
    fn supports_atomic_batch(&self) -> bool {
        false
    }

    /// Inserts several documents, reporting the outcome of each.
    ///
    /// The default attempts each insert independently, so earlier documents
    /// stay stored when a later one fails. Engines that return `true` from
    /// [`Engine::supports_atomic_batch`] override this to store all documents or
    /// none and return the first failure as `Err`.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the engine itself fails; per-document
    /// rejections are reported inside the returned vector.
    fn insert_batch(&mut self, table: &str, values: Vec<Value>) -> Result<Vec<Result<u64>>> {
        Ok(values.into_iter().map(|value| self.insert(table, value)).collect())
    }

    /// Fetches a document by key.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` for engine failures.
    fn get(&self, table: &str, key: u64) -> Result<Option<Value>>;

    /// All documents in ascending key order.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` for engine failures.
    fn scan(&self, table: &str) -> Result<Vec<(u64, Value)>>;

    /// Replaces an existing document.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the key is absent, `DuplicateKey` on a unique index
    /// violation, `StoreUnavailable` for engine failures.
    fn replace(&mut self, table: &str, key: u64, value: Value) -> Result<()>;

    /// Deletes a document. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` for engine failures.
    fn delete(&mut self, table: &str, key: u64) -> Result<()>;

    /// Removes every document from a table.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` for engine failures.
    fn clear(&mut self, table: &str) -> Result<()>;
}
