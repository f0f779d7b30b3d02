//! Storage record models for the embedded engine.
//!
//! These types describe the engine-level data layout: named tables of JSON
//! documents keyed by an auto-incrementing integer, with optional secondary
//! unique indexes. They are independent of the employee domain type so that
//! engines never need to know what they store.

use crate::domain::error::{Result, RosterError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Secondary index definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSpec {
    /// Index name, reported in [`RosterError::DuplicateKey`].
    pub name: String,

    /// Top-level document field the index reads.
    pub key_path: String,

    /// Whether two documents may share a value for this index.
    pub unique: bool,
}

impl IndexSpec {
    /// Unique index over a single field, named after it.
    pub fn unique(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            name: field.clone(),
            key_path: field,
            unique: true,
        }
    }
}

/// Table definition: name, primary key field and secondary indexes.
///
/// Primary keys are always auto-incremented integers written into
/// `key_path` of each stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub key_path: String,
    #[serde(default)]
    pub indexes: Vec<IndexSpec>,
}

/// A single table of JSON documents.
///
/// Keys start at 1 and the counter only moves forward, so keys of deleted
/// documents are never handed out again (not even after [`Table::clear`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    schema: TableSchema,

    /// Next key to assign.
    next_key: u64,

    /// Stored documents by primary key.
    #[serde(default)]
    rows: BTreeMap<u64, Value>,
}

impl Table {
    #[must_use]
    pub const fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            next_key: 1,
            rows: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn schema(&self) -> &TableSchema {
        &self.schema
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Inserts a document and returns its assigned key.
    ///
    /// # Errors
    ///
    /// - [`RosterError::InvalidInput`] if the value is not an object or already
    ///   carries a primary key
    /// - [`RosterError::DuplicateKey`] if a unique index would be violated
    pub fn insert(&mut self, mut value: Value) -> Result<u64> {
        let key_path = self.schema.key_path.clone();
        let object = value
            .as_object_mut()
            .ok_or_else(|| RosterError::InvalidInput("document must be an object".to_string()))?;

        if object.get(&key_path).is_some_and(|key| !key.is_null()) {
            return Err(RosterError::InvalidInput(format!(
                "document already has a `{key_path}`; keys are assigned on insert"
            )));
        }

        self.check_unique(object, None)?;

        let key = self.next_key;
        self.next_key = self.next_key.saturating_add(1);
        object.insert(key_path, Value::from(key));
        self.rows.insert(key, value);
        Ok(key)
    }

    /// Inserts every document or none of them.
    ///
    /// # Errors
    ///
    /// Returns the first insert error; the table is left untouched.
    pub fn insert_all(&mut self, values: Vec<Value>) -> Result<Vec<u64>> {
        let mut staged = self.clone();
        let keys = values
            .into_iter()
            .map(|value| staged.insert(value))
            .collect::<Result<Vec<_>>>()?;
        *self = staged;
        Ok(keys)
    }

    /// Replaces the document stored under `key`.
    ///
    /// The stored document's key field is overwritten with `key`.
    ///
    /// # Errors
    ///
    /// - [`RosterError::NotFound`] if no document has that key
    /// - [`RosterError::DuplicateKey`] if another document holds a unique value
    /// - [`RosterError::InvalidInput`] if the value is not an object
    pub fn replace(&mut self, key: u64, mut value: Value) -> Result<()> {
        if !self.rows.contains_key(&key) {
            return Err(RosterError::NotFound(format!("{} #{key}", self.schema.name)));
        }

        let key_path = self.schema.key_path.clone();
        let object = value
            .as_object_mut()
            .ok_or_else(|| RosterError::InvalidInput("document must be an object".to_string()))?;

        self.check_unique(object, Some(key))?;

        object.insert(key_path, Value::from(key));
        self.rows.insert(key, value);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: u64) -> Option<&Value> {
        self.rows.get(&key)
    }

    /// All documents in ascending key order.
    #[must_use]
    pub fn scan(&self) -> Vec<(u64, Value)> {
        self.rows.iter().map(|(key, value)| (*key, value.clone())).collect()
    }

    /// Removes a document; returns whether it existed.
    pub fn delete(&mut self, key: u64) -> bool {
        self.rows.remove(&key).is_some()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Rejects `candidate` if any unique index value is already taken.
    ///
    /// Documents without the indexed field (or with `null`) are not indexed.
    fn check_unique(&self, candidate: &Map<String, Value>, ignore_key: Option<u64>) -> Result<()> {
        for index in self.schema.indexes.iter().filter(|index| index.unique) {
            let Some(needle) = candidate.get(&index.key_path).filter(|v| !v.is_null()) else {
                continue;
            };

            let taken = self
                .rows
                .iter()
                .filter(|(key, _)| Some(**key) != ignore_key)
                .any(|(_, row)| row.get(&index.key_path) == Some(needle));

            if taken {
                return Err(RosterError::DuplicateKey(index.name.clone()));
            }
        }
        Ok(())
    }
}

/// Top-level persisted container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageData {
    /// Schema version last opened; 0 means never opened.
    pub version: u32,

    #[serde(default)]
    pub tables: BTreeMap<String, Table>,
}

impl StorageData {
    /// Looks up a table by name.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::StoreUnavailable`] if the table was never created.
    pub fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| RosterError::StoreUnavailable(format!("no such table: {name}")))
    }

    /// Mutable variant of [`StorageData::table`].
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::StoreUnavailable`] if the table was never created.
    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| RosterError::StoreUnavailable(format!("no such table: {name}")))
    }

    /// Creates a table unless one with the same name exists.
    pub fn create_table(&mut self, schema: TableSchema) {
        self.tables
            .entry(schema.name.clone())
            .or_insert_with(|| Table::new(schema));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn people() -> Table {
        Table::new(TableSchema {
            name: "people".to_string(),
            key_path: "id".to_string(),
            indexes: vec![IndexSpec::unique("email")],
        })
    }

    #[test]
    fn assigns_increasing_keys_and_writes_them_into_documents() {
        let mut table = people();
        let first = table.insert(json!({"email": "a@x.io"})).unwrap();
        let second = table.insert(json!({"email": "b@x.io"})).unwrap();

        assert_eq!((first, second), (1, 2));
        assert_eq!(table.get(2).unwrap()["id"], 2);
    }

    #[test]
    fn keys_are_not_reused_after_delete_or_clear() {
        let mut table = people();
        let first = table.insert(json!({"email": "a@x.io"})).unwrap();
        assert!(table.delete(first));
        table.clear();

        assert_eq!(table.insert(json!({"email": "a@x.io"})).unwrap(), 2);
    }

    #[test]
    fn unique_index_rejects_duplicates_but_not_self_replacement() {
        let mut table = people();
        let key = table.insert(json!({"email": "a@x.io", "name": "A"})).unwrap();
        table.insert(json!({"email": "b@x.io"})).unwrap();

        assert_eq!(
            table.insert(json!({"email": "a@x.io"})),
            Err(RosterError::DuplicateKey("email".to_string()))
        );
        assert!(table.replace(key, json!({"email": "a@x.io", "name": "A2"})).is_ok());
        assert_eq!(
            table.replace(key, json!({"email": "b@x.io"})),
            Err(RosterError::DuplicateKey("email".to_string()))
        );
    }

    #[test]
    fn insert_all_is_all_or_nothing() {
        let mut table = people();
        table.insert(json!({"email": "taken@x.io"})).unwrap();
        let before = table.clone();

        let result = table.insert_all(vec![json!({"email": "new@x.io"}), json!({"email": "taken@x.io"})]);

        assert!(matches!(result, Err(RosterError::DuplicateKey(_))));
        assert_eq!(table, before);
    }

    #[test]
    fn replace_of_missing_key_is_not_found() {
        let mut table = people();
        assert!(matches!(table.replace(9, json!({})), Err(RosterError::NotFound(_))));
    }

    #[test]
    fn documents_with_preset_keys_are_rejected() {
        let mut table = people();
        assert!(matches!(
            table.insert(json!({"id": 5, "email": "a@x.io"})),
            Err(RosterError::InvalidInput(_))
        ));
    }

    #[test]
    fn storage_data_round_trips_through_json() {
        let mut data = StorageData { version: 1, ..StorageData::default() };
        data.create_table(people().schema().clone());
        data.table_mut("people").unwrap().insert(json!({"email": "a@x.io"})).unwrap();

        let text = serde_json::to_string(&data).unwrap();
        let back: StorageData = serde_json::from_str(&text).unwrap();
        assert_eq!(back, data);
    }
}
