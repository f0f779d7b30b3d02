//! Storage layer for employee records.
//!
//! This module provides the embedded engine abstraction and the async record
//! store built on top of it.
//!
//! # Modules
//!
//! - `backend`: [`Engine`] trait over embedded key-value engines
//! - `models`: Engine-level tables, schemas and unique indexes
//! - `memory`: In-memory engine
//! - `json`: JSON file engine with atomic writes
//! - `records`: Async [`RecordStore`] with employee CRUD
//! - `seed`: Bundled sample employees

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;
pub mod records;
pub mod seed;

pub use backend::{Engine, OpenOutcome};
pub use json::JsonFileEngine;
pub use memory::MemoryEngine;
pub use models::{IndexSpec, StorageData, Table, TableSchema};
pub use records::{employee_schema, BatchReport, RecordStore, EMPLOYEE_TABLE, SCHEMA_VERSION};
pub use seed::seed_employees;
