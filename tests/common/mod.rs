//! Shared fixtures and engine test doubles.

#![allow(dead_code)]

use chrono::NaiveDate;
use roster::domain::{Department, Position};
use roster::storage::{Engine, MemoryEngine, OpenOutcome, TableSchema};
use roster::{Employee, Result, RosterError};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn employee(first_name: &str, email: &str) -> Employee {
    Employee {
        id: None,
        first_name: first_name.to_string(),
        last_name: "Demir".to_string(),
        date_of_employment: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
        date_of_birth: NaiveDate::from_ymd_opt(1992, 7, 14).unwrap(),
        phone: "533 987 65 43".to_string(),
        email: email.to_string(),
        department: Department::Tech,
        position: Position::Senior,
    }
}

pub fn employees(count: usize) -> Vec<Employee> {
    (1..=count)
        .map(|n| employee(&format!("E{n}"), &format!("e{n}@company.com")))
        .collect()
}

/// Call counters shared between a test and its engine.
#[derive(Debug, Default, Clone)]
pub struct Calls {
    pub opens: Arc<AtomicUsize>,
    pub tables_created: Arc<AtomicUsize>,
}

impl Calls {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn tables_created(&self) -> usize {
        self.tables_created.load(Ordering::SeqCst)
    }
}

/// Memory engine that counts opens and schema creations, and can be told to
/// fail its first opens.
#[derive(Debug)]
pub struct CountingEngine {
    inner: MemoryEngine,
    calls: Calls,
    failing_opens: usize,
    atomic_batches: bool,
}

impl CountingEngine {
    pub fn new(calls: Calls) -> Self {
        Self {
            inner: MemoryEngine::new(),
            calls,
            failing_opens: 0,
            atomic_batches: true,
        }
    }

    /// Fails the next `count` calls to `open`.
    pub fn failing_first_opens(mut self, count: usize) -> Self {
        self.failing_opens = count;
        self
    }

    /// Reports batches as non-atomic and inserts each document independently.
    pub fn non_atomic(mut self) -> Self {
        self.atomic_batches = false;
        self
    }
}

impl Engine for CountingEngine {
    fn open(&mut self, version: u32) -> Result<OpenOutcome> {
        self.calls.opens.fetch_add(1, Ordering::SeqCst);
        if self.failing_opens > 0 {
            self.failing_opens -= 1;
            return Err(RosterError::StoreUnavailable("disk not mounted".to_string()));
        }
        self.inner.open(version)
    }

    fn has_table(&self, name: &str) -> bool {
        self.inner.has_table(name)
    }

    fn create_table(&mut self, schema: TableSchema) -> Result<()> {
        self.calls.tables_created.fetch_add(1, Ordering::SeqCst);
        self.inner.create_table(schema)
    }

    fn insert(&mut self, table: &str, value: Value) -> Result<u64> {
        self.inner.insert(table, value)
    }

    fn supports_atomic_batch(&self) -> bool {
        self.atomic_batches
    }

    fn insert_batch(&mut self, table: &str, values: Vec<Value>) -> Result<Vec<Result<u64>>> {
        if self.atomic_batches {
            self.inner.insert_batch(table, values)
        } else {
            Ok(values.into_iter().map(|value| self.inner.insert(table, value)).collect())
        }
    }

    fn get(&self, table: &str, key: u64) -> Result<Option<Value>> {
        self.inner.get(table, key)
    }

    fn scan(&self, table: &str) -> Result<Vec<(u64, Value)>> {
        self.inner.scan(table)
    }

    fn replace(&mut self, table: &str, key: u64, value: Value) -> Result<()> {
        self.inner.replace(table, key, value)
    }

    fn delete(&mut self, table: &str, key: u64) -> Result<()> {
        self.inner.delete(table, key)
    }

    fn clear(&mut self, table: &str) -> Result<()> {
        self.inner.clear(table)
    }
}
