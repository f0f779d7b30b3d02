//! Worker message types.
//!
//! This module defines the request and response protocol between the
//! coordinator and the worker that owns the record store. Every request has a
//! matching success response; any failure comes back as
//! [`WorkerResponse::Error`] carrying the error kind.

use crate::domain::{Employee, EmployeeId, ErrorKind};
use serde::{Deserialize, Serialize};

/// Requests sent from the coordinator to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Initialize the store, then insert `seed` in one batch if it is empty.
    Initialize {
        /// Records to insert into an empty store. May be empty.
        seed: Vec<Employee>,
    },

    /// Load every record, newest first.
    LoadEmployees,

    /// Load one record, e.g. for the edit form.
    GetEmployee {
        id: EmployeeId,
    },

    /// Store a new record.
    AddEmployee {
        employee: Employee,
    },

    /// Replace an existing record.
    UpdateEmployee {
        employee: Employee,
    },

    /// Delete a record.
    RemoveEmployee {
        id: EmployeeId,
    },

    /// Delete every record.
    ClearEmployees,
}

/// Responses sent from the worker back to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The store is ready.
    Initialized {
        /// Number of seed records inserted (0 if the store already had data).
        seeded: usize,
    },

    /// Every stored record, newest first.
    EmployeesLoaded {
        employees: Vec<Employee>,
    },

    /// Result of a single-record lookup.
    EmployeeFound {
        id: EmployeeId,
        employee: Option<Employee>,
    },

    EmployeeAdded {
        id: EmployeeId,
    },

    EmployeeUpdated {
        id: EmployeeId,
    },

    EmployeeRemoved {
        id: EmployeeId,
    },

    /// Every record was deleted.
    Cleared,

    /// The operation failed.
    Error {
        kind: ErrorKind,
        /// Human-readable error message.
        message: String,
    },
}
