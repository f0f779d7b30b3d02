//! Worker implementation for store operations.
//!
//! [`RosterWorker`] owns the [`RecordStore`] and turns each [`WorkerMessage`]
//! into one or more store calls, answering with a [`WorkerResponse`]. Store
//! errors never escape as `Err`; they become [`WorkerResponse::Error`] so the
//! coordinator can record them like any other outcome.

use crate::domain::error::{Result, RosterError};
use crate::domain::Employee;
use crate::storage::{Engine, RecordStore};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Executes worker messages against a record store.
pub struct RosterWorker<E> {
    store: RecordStore<E>,
}

impl<E: Engine + 'static> RosterWorker<E> {
    pub const fn new(store: RecordStore<E>) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn store(&self) -> &RecordStore<E> {
        &self.store
    }

    /// Helper for handling store results with consistent logging.
    fn handle_db_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "storage operation failed");
                WorkerResponse::Error {
                    kind: e.kind(),
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    /// Processes one message.
    pub async fn handle(&self, message: WorkerMessage) -> WorkerResponse {
        match message {
            WorkerMessage::Initialize { seed } => {
                let result = self.initialize_and_seed(&seed).await;
                Self::handle_db_result("initialize", result, |seeded| {
                    WorkerResponse::Initialized { seeded }
                })
            }
            WorkerMessage::LoadEmployees => {
                let result = self.store.get_all().await;
                Self::handle_db_result("load employees", result, |employees| {
                    WorkerResponse::EmployeesLoaded { employees }
                })
            }
            WorkerMessage::GetEmployee { id } => {
                let result = self.store.get_by_id(id).await;
                Self::handle_db_result("get employee", result, |employee| {
                    WorkerResponse::EmployeeFound { id, employee }
                })
            }
            WorkerMessage::AddEmployee { employee } => {
                let result = self.store.add(&employee).await;
                Self::handle_db_result("add employee", result, |id| WorkerResponse::EmployeeAdded { id })
            }
            WorkerMessage::UpdateEmployee { employee } => {
                let result = match employee.id {
                    Some(id) => self.store.update(&employee).await.map(|()| id),
                    None => Err(RosterError::InvalidInput("update requires an id".to_string())),
                };
                Self::handle_db_result("update employee", result, |id| {
                    WorkerResponse::EmployeeUpdated { id }
                })
            }
            WorkerMessage::RemoveEmployee { id } => {
                let result = self.store.remove(id).await;
                Self::handle_db_result("remove employee", result, |()| {
                    WorkerResponse::EmployeeRemoved { id }
                })
            }
            WorkerMessage::ClearEmployees => {
                let result = self.store.clear().await;
                Self::handle_db_result("clear employees", result, |()| WorkerResponse::Cleared)
            }
        }
    }

    /// Initializes the store and seeds it when empty.
    ///
    /// Returns the number of seeded records.
    async fn initialize_and_seed(&self, seed: &[Employee]) -> Result<usize> {
        self.store.initialize().await?;

        if seed.is_empty() || self.store.count().await? > 0 {
            return Ok(0);
        }

        let report = self.store.add_batch(seed).await?;
        tracing::info!(
            seeded = report.inserted.len(),
            rejected = report.rejected.len(),
            "seeded empty store"
        );
        Ok(report.inserted.len())
    }
}
