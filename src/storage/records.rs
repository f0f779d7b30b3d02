//! Asynchronous employee record store.
//!
//! [`RecordStore`] owns an [`Engine`] and exposes the employee CRUD operations
//! as async functions. It creates the `employees` table (auto-increment `id`,
//! unique `email` index) during [`RecordStore::initialize`], converts between
//! [`Employee`] and stored documents, and guarantees id-descending listing order.
//!
//! # Initialization
//!
//! `initialize` may be awaited from any number of call sites at once. The first
//! caller creates a shared future; every other caller awaits that same future,
//! so the engine is opened and the schema created at most once. A failed
//! initialization is forgotten so a later call can retry.
//!
//! # Example
//!
//! ```
//! use roster::storage::{MemoryEngine, RecordStore};
//!
//! # futures::executor::block_on(async {
//! let store = RecordStore::new(MemoryEngine::new());
//! store.initialize().await?;
//! assert!(store.get_all().await?.is_empty());
//! # Ok::<(), roster::RosterError>(())
//! # })?;
//! # Ok::<(), roster::RosterError>(())
//! ```

use crate::domain::error::{Result, RosterError};
use crate::domain::{Employee, EmployeeId};
use crate::storage::backend::Engine;
use crate::storage::models::{IndexSpec, TableSchema};
use futures_util::future::{BoxFuture, FutureExt, Shared};
use futures_util::lock::{Mutex, MutexGuard};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError};

/// Name of the employee table.
pub const EMPLOYEE_TABLE: &str = "employees";

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Schema of the employee table at [`SCHEMA_VERSION`].
#[must_use]
pub fn employee_schema() -> TableSchema {
    TableSchema {
        name: EMPLOYEE_TABLE.to_string(),
        key_path: "id".to_string(),
        indexes: vec![IndexSpec::unique("email")],
    }
}

type InitFuture = Shared<BoxFuture<'static, Result<()>>>;

/// In-flight or completed initialization, tagged so a failed attempt is only
/// cleared by the callers that awaited it.
#[derive(Default)]
struct InitSlot {
    generation: u64,
    pending: Option<InitFuture>,
}

/// Outcome of [`RecordStore::add_batch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Ids of stored records, in input order.
    pub inserted: Vec<EmployeeId>,

    /// Input positions that were not stored, with the reason.
    pub rejected: Vec<(usize, RosterError)>,
}

impl BatchReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Async CRUD over employee records.
///
/// Every operation except [`RecordStore::initialize`] fails with
/// [`RosterError::StoreUnavailable`] until initialization has succeeded.
pub struct RecordStore<E> {
    engine: Arc<Mutex<E>>,
    ready: Arc<AtomicBool>,
    init: std::sync::Mutex<InitSlot>,
}

impl<E: Engine + 'static> RecordStore<E> {
    /// Wraps an engine. The engine is not opened until [`RecordStore::initialize`].
    pub fn new(engine: E) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            ready: Arc::new(AtomicBool::new(false)),
            init: std::sync::Mutex::new(InitSlot::default()),
        }
    }

    /// Whether initialization has completed successfully.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Opens the engine and creates the schema, once.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::StoreUnavailable`] if the engine cannot be opened
    /// or the schema cannot be created.
    pub async fn initialize(&self) -> Result<()> {
        if self.is_ready() {
            return Ok(());
        }

        let (generation, init) = self.init_future();
        let outcome = init.await;

        if let Err(e) = &outcome {
            tracing::warn!(error = %e, "store initialization failed");
            let mut slot = self.init.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.generation == generation {
                slot.pending = None;
            }
        }
        outcome
    }

    /// Returns the shared initialization future, starting one if none is pending.
    fn init_future(&self) -> (u64, InitFuture) {
        let mut slot = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = &slot.pending {
            return (slot.generation, pending.clone());
        }

        slot.generation += 1;
        let engine = Arc::clone(&self.engine);
        let ready = Arc::clone(&self.ready);
        let init = open_and_upgrade(engine, ready).boxed().shared();
        slot.pending = Some(init.clone());
        (slot.generation, init)
    }

    /// Locks the engine, failing if the store is not initialized.
    async fn engine(&self) -> Result<MutexGuard<'_, E>> {
        if !self.is_ready() {
            return Err(RosterError::StoreUnavailable("store is not initialized".to_string()));
        }
        Ok(self.engine.lock().await)
    }

    /// Inserts a new record and returns its assigned id.
    ///
    /// # Errors
    ///
    /// - [`RosterError::InvalidInput`] if the record already has an id or a blank email
    /// - [`RosterError::DuplicateKey`] if the email is already stored
    /// - [`RosterError::StoreUnavailable`] if the store is not initialized or fails
    #[tracing::instrument(level = "debug", skip_all, fields(email = %employee.email))]
    pub async fn add(&self, employee: &Employee) -> Result<EmployeeId> {
        let value = encode_new(employee)?;
        let mut engine = self.engine().await?;
        let key = engine.insert(EMPLOYEE_TABLE, value)?;
        let id = EmployeeId::new(key)?;
        tracing::debug!(%id, "employee added");
        Ok(id)
    }

    /// Inserts several records as one logical unit.
    ///
    /// With an engine whose batches are atomic, either every record is stored
    /// or the first failure is returned and nothing is stored. Otherwise each
    /// record is attempted independently: the report lists what was stored and
    /// what was rejected, and an error is returned only if nothing was stored.
    /// That path does NOT guarantee all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns the first rejection when the whole batch failed, or
    /// [`RosterError::StoreUnavailable`] for engine failures.
    #[tracing::instrument(level = "debug", skip_all, fields(count = employees.len()))]
    pub async fn add_batch(&self, employees: &[Employee]) -> Result<BatchReport> {
        let mut engine = self.engine().await?;
        let atomic = engine.supports_atomic_batch();

        let mut report = BatchReport::default();
        let mut values = Vec::with_capacity(employees.len());
        let mut positions = Vec::with_capacity(employees.len());

        for (position, employee) in employees.iter().enumerate() {
            match encode_new(employee) {
                Ok(value) => {
                    values.push(value);
                    positions.push(position);
                }
                Err(e) if atomic => return Err(e),
                Err(e) => report.rejected.push((position, e)),
            }
        }

        let outcomes = engine.insert_batch(EMPLOYEE_TABLE, values)?;
        for (position, outcome) in positions.into_iter().zip(outcomes) {
            match outcome.and_then(EmployeeId::new) {
                Ok(id) => report.inserted.push(id),
                Err(e) => report.rejected.push((position, e)),
            }
        }
        report.rejected.sort_by_key(|(position, _)| *position);

        if report.inserted.is_empty() {
            if let Some((_, first)) = report.rejected.first() {
                return Err(first.clone());
            }
        }

        tracing::debug!(
            atomic,
            inserted = report.inserted.len(),
            rejected = report.rejected.len(),
            "batch added"
        );
        Ok(report)
    }

    /// Every record, most recently created id first.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::StoreUnavailable`] if the store is not initialized,
    /// fails, or holds a document that no longer decodes.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn get_all(&self) -> Result<Vec<Employee>> {
        let engine = self.engine().await?;
        let mut employees = engine
            .scan(EMPLOYEE_TABLE)?
            .into_iter()
            .map(|(_, value)| decode(value))
            .collect::<Result<Vec<_>>>()?;
        drop(engine);

        employees.sort_by(|a, b| b.id.cmp(&a.id));
        tracing::debug!(count = employees.len(), "retrieved employees");
        Ok(employees)
    }

    /// The record with this id, or `None`.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::StoreUnavailable`] if the store is not initialized or fails.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_by_id(&self, id: EmployeeId) -> Result<Option<Employee>> {
        let engine = self.engine().await?;
        let found = engine.get(EMPLOYEE_TABLE, id.get())?.map(decode).transpose()?;
        tracing::debug!(found = found.is_some(), "employee lookup complete");
        Ok(found)
    }

    /// Replaces a stored record wholesale.
    ///
    /// # Errors
    ///
    /// - [`RosterError::InvalidInput`] if the record has no id or a blank email
    /// - [`RosterError::NotFound`] if no record has that id
    /// - [`RosterError::DuplicateKey`] if another record holds the new email
    /// - [`RosterError::StoreUnavailable`] if the store is not initialized or fails
    #[tracing::instrument(level = "debug", skip_all, fields(id = ?employee.id))]
    pub async fn update(&self, employee: &Employee) -> Result<()> {
        let id = employee
            .id
            .ok_or_else(|| RosterError::InvalidInput("update requires an id".to_string()))?;
        check_key(employee)?;
        let value = serde_json::to_value(employee)?;

        let mut engine = self.engine().await?;
        engine.replace(EMPLOYEE_TABLE, id.get(), value)?;
        tracing::debug!(%id, "employee updated");
        Ok(())
    }

    /// Deletes a record. Missing ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::StoreUnavailable`] if the store is not initialized or fails.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn remove(&self, id: EmployeeId) -> Result<()> {
        let mut engine = self.engine().await?;
        engine.delete(EMPLOYEE_TABLE, id.get())?;
        tracing::debug!("employee removed");
        Ok(())
    }

    /// Deletes every record. Ids already handed out are still never reused.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::StoreUnavailable`] if the store is not initialized or fails.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn clear(&self) -> Result<()> {
        let mut engine = self.engine().await?;
        engine.clear(EMPLOYEE_TABLE)?;
        tracing::debug!("employees cleared");
        Ok(())
    }

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::StoreUnavailable`] if the store is not initialized or fails.
    pub async fn count(&self) -> Result<usize> {
        let engine = self.engine().await?;
        Ok(engine.scan(EMPLOYEE_TABLE)?.len())
    }
}

/// Opens the engine and runs the upgrade hook when the stored version is older.
async fn open_and_upgrade<E: Engine>(engine: Arc<Mutex<E>>, ready: Arc<AtomicBool>) -> Result<()> {
    let mut engine = engine.lock().await;
    let outcome = engine.open(SCHEMA_VERSION)?;

    if outcome.needs_upgrade(SCHEMA_VERSION) || !engine.has_table(EMPLOYEE_TABLE) {
        tracing::debug!(
            from = outcome.previous_version,
            to = SCHEMA_VERSION,
            "upgrading schema"
        );
        upgrade(&mut *engine, outcome.previous_version)?;
    }

    ready.store(true, Ordering::Release);
    tracing::debug!("record store initialized");
    Ok(())
}

/// Schema migrations, applied in version order.
fn upgrade<E: Engine + ?Sized>(engine: &mut E, from_version: u32) -> Result<()> {
    if from_version < 1 || !engine.has_table(EMPLOYEE_TABLE) {
        engine.create_table(employee_schema())?;
    }
    Ok(())
}

/// Rejects blank unique keys.
fn check_key(employee: &Employee) -> Result<()> {
    if employee.email.trim().is_empty() {
        return Err(RosterError::InvalidInput("email must not be blank".to_string()));
    }
    Ok(())
}

/// Encodes a record that has not been stored yet.
fn encode_new(employee: &Employee) -> Result<Value> {
    if let Some(id) = employee.id {
        return Err(RosterError::InvalidInput(format!(
            "new employee must not carry an id (got {id})"
        )));
    }
    check_key(employee)?;
    Ok(serde_json::to_value(employee)?)
}

fn decode(value: Value) -> Result<Employee> {
    serde_json::from_value(value)
        .map_err(|e| RosterError::StoreUnavailable(format!("corrupt employee document: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::sample_employee;
    use crate::storage::MemoryEngine;
    use futures::executor::block_on;
    use futures::future::join_all;
    use futures::task::noop_waker_ref;
    use std::task::Context;

    fn ready_store() -> RecordStore<MemoryEngine> {
        let store = RecordStore::new(MemoryEngine::new());
        block_on(store.initialize()).unwrap();
        store
    }

    #[test]
    fn operations_before_initialize_are_unavailable() {
        let store = RecordStore::new(MemoryEngine::new());
        let employee = sample_employee("Ahmet", "ahmet@company.com");

        assert!(matches!(block_on(store.add(&employee)), Err(RosterError::StoreUnavailable(_))));
        assert!(matches!(block_on(store.get_all()), Err(RosterError::StoreUnavailable(_))));
        assert!(!store.is_ready());
    }

    #[test]
    fn overlapping_initialize_calls_share_one_attempt() {
        let store = RecordStore::new(MemoryEngine::new());
        let engine = block_on(store.engine.lock());

        let mut callers: Vec<_> = (0..8).map(|_| store.initialize().boxed_local()).collect();
        let mut cx = Context::from_waker(noop_waker_ref());
        for caller in &mut callers {
            assert!(caller.poll_unpin(&mut cx).is_pending());
        }
        assert_eq!(store.init.lock().unwrap().generation, 1);
        assert!(!store.is_ready());

        drop(engine);
        let results = block_on(join_all(callers));

        assert!(results.iter().all(|result| result.is_ok()));
        assert!(store.is_ready());
        assert_eq!(store.init.lock().unwrap().generation, 1);
    }

    #[test]
    fn add_then_get_returns_record_with_assigned_id() {
        let store = ready_store();
        let employee = sample_employee("Ahmet", "ahmet@company.com");

        let id = block_on(store.add(&employee)).unwrap();
        let stored = block_on(store.get_by_id(id)).unwrap().unwrap();

        assert_eq!(stored, employee.with_id(id));
    }

    #[test]
    fn add_rejects_records_that_already_have_an_id() {
        let store = ready_store();
        let employee = sample_employee("Ahmet", "ahmet@company.com").with_id(EmployeeId::new(3).unwrap());

        assert!(matches!(block_on(store.add(&employee)), Err(RosterError::InvalidInput(_))));
    }

    #[test]
    fn blank_email_is_invalid_input() {
        let store = ready_store();
        let employee = sample_employee("Ahmet", "   ");

        assert!(matches!(block_on(store.add(&employee)), Err(RosterError::InvalidInput(_))));
    }

    #[test]
    fn update_requires_existing_id() {
        let store = ready_store();
        let ghost = sample_employee("Ghost", "ghost@company.com").with_id(EmployeeId::new(99).unwrap());

        assert!(matches!(block_on(store.update(&ghost)), Err(RosterError::NotFound(_))));

        let no_id = sample_employee("Ahmet", "ahmet@company.com");
        assert!(matches!(block_on(store.update(&no_id)), Err(RosterError::InvalidInput(_))));
    }

    #[test]
    fn update_replaces_whole_record() {
        let store = ready_store();
        let id = block_on(store.add(&sample_employee("Ahmet", "ahmet@company.com"))).unwrap();

        let mut changed = sample_employee("Mehmet", "mehmet@company.com").with_id(id);
        changed.phone = "534 345 67 89".to_string();
        block_on(store.update(&changed)).unwrap();

        assert_eq!(block_on(store.get_by_id(id)).unwrap(), Some(changed));
    }

    #[test]
    fn clear_empties_store() {
        let store = ready_store();
        block_on(store.add(&sample_employee("Ahmet", "ahmet@company.com"))).unwrap();
        block_on(store.clear()).unwrap();

        assert_eq!(block_on(store.count()).unwrap(), 0);
    }

    #[test]
    fn atomic_batch_stores_nothing_when_one_entry_fails() {
        let store = ready_store();
        block_on(store.add(&sample_employee("Ahmet", "dup@company.com"))).unwrap();

        let batch = vec![
            sample_employee("Ayşe", "ayse@company.com"),
            sample_employee("Ali", "dup@company.com"),
        ];
        let result = block_on(store.add_batch(&batch));

        assert_eq!(result, Err(RosterError::DuplicateKey("email".to_string())));
        assert_eq!(block_on(store.count()).unwrap(), 1);
    }

    #[test]
    fn empty_batch_is_an_empty_report() {
        let store = ready_store();
        let report = block_on(store.add_batch(&[])).unwrap();
        assert!(report.inserted.is_empty());
        assert!(report.is_complete());
    }
}
