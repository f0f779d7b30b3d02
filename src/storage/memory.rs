//! In-memory storage engine.
//!
//! Holds all tables in process memory. Used by tests and by callers that do not
//! need persistence across runs.

use crate::domain::error::{Result, RosterError};
use crate::storage::backend::{Engine, OpenOutcome};
use crate::storage::models::{StorageData, TableSchema};
use serde_json::Value;

/// Process-local engine. Batches are atomic.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    data: StorageData,
    opened: bool,
}

impl MemoryEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn data(&self) -> Result<&StorageData> {
        if self.opened {
            Ok(&self.data)
        } else {
            Err(RosterError::StoreUnavailable("engine is not open".to_string()))
        }
    }

    fn data_mut(&mut self) -> Result<&mut StorageData> {
        if self.opened {
            Ok(&mut self.data)
        } else {
            Err(RosterError::StoreUnavailable("engine is not open".to_string()))
        }
    }
}

/// Shared `open` rule for engines backed by [`StorageData`].
pub(crate) fn open_version(data: &mut StorageData, version: u32) -> Result<OpenOutcome> {
    if data.version > version {
        return Err(RosterError::StoreUnavailable(format!(
            "stored schema version {} is newer than requested {version}",
            data.version
        )));
    }
    let previous_version = data.version;
    data.version = version;
    Ok(OpenOutcome { previous_version })
}

impl Engine for MemoryEngine {
    fn open(&mut self, version: u32) -> Result<OpenOutcome> {
        let outcome = open_version(&mut self.data, version)?;
        self.opened = true;
        tracing::debug!(previous_version = outcome.previous_version, version, "memory engine opened");
        Ok(outcome)
    }

    fn has_table(&self, name: &str) -> bool {
        self.data.tables.contains_key(name)
    }

    fn create_table(&mut self, schema: TableSchema) -> Result<()> {
        self.data_mut()?.create_table(schema);
        Ok(())
    }

    fn insert(&mut self, table: &str, value: Value) -> Result<u64> {
        self.data_mut()?.table_mut(table)?.insert(value)
    }

    fn supports_atomic_batch(&self) -> bool {
        true
    }

    fn insert_batch(&mut self, table: &str, values: Vec<Value>) -> Result<Vec<Result<u64>>> {
        let keys = self.data_mut()?.table_mut(table)?.insert_all(values)?;
        Ok(keys.into_iter().map(Ok).collect())
    }

    fn get(&self, table: &str, key: u64) -> Result<Option<Value>> {
        Ok(self.data()?.table(table)?.get(key).cloned())
    }

    fn scan(&self, table: &str) -> Result<Vec<(u64, Value)>> {
        Ok(self.data()?.table(table)?.scan())
    }

    fn replace(&mut self, table: &str, key: u64, value: Value) -> Result<()> {
        self.data_mut()?.table_mut(table)?.replace(key, value)
    }

    fn delete(&mut self, table: &str, key: u64) -> Result<()> {
        self.data_mut()?.table_mut(table)?.delete(key);
        Ok(())
    }

    fn clear(&mut self, table: &str) -> Result<()> {
        self.data_mut()?.table_mut(table)?.clear();
        Ok(())
    }
}
