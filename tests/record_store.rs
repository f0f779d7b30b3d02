//! Record store behavior over counting and non-atomic engines.

mod common;

use common::{employee, employees, Calls, CountingEngine};
use futures::executor::block_on;
use futures::future::join_all;
use roster::storage::{JsonFileEngine, MemoryEngine, RecordStore};
use roster::{EmployeeId, RosterError};

fn ready_store() -> RecordStore<MemoryEngine> {
    let store = RecordStore::new(MemoryEngine::new());
    block_on(store.initialize()).unwrap();
    store
}

#[test]
fn repeated_initialize_creates_schema_once() {
    let calls = Calls::default();
    let store = RecordStore::new(CountingEngine::new(calls.clone()));

    let results = block_on(join_all((0..16).map(|_| store.initialize())));

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(calls.opens(), 1);
    assert_eq!(calls.tables_created(), 1);

    block_on(store.initialize()).unwrap();
    assert_eq!(calls.opens(), 1);
}

#[test]
fn failed_initialize_is_retried() {
    let calls = Calls::default();
    let store = RecordStore::new(CountingEngine::new(calls.clone()).failing_first_opens(1));

    let first = block_on(store.initialize());
    assert!(matches!(first, Err(RosterError::StoreUnavailable(_))));
    assert_eq!(calls.opens(), 1);
    assert!(!store.is_ready());
    assert!(matches!(
        block_on(store.get_all()),
        Err(RosterError::StoreUnavailable(_))
    ));

    block_on(store.initialize()).unwrap();
    assert_eq!(calls.opens(), 2);
    assert_eq!(calls.tables_created(), 1);
    assert!(store.is_ready());
}

#[test]
fn empty_store_lists_nothing() {
    let store = ready_store();
    assert!(block_on(store.get_all()).unwrap().is_empty());
    assert_eq!(block_on(store.count()).unwrap(), 0);
}

#[test]
fn get_all_is_newest_first() {
    let store = ready_store();
    for employee in employees(5) {
        block_on(store.add(&employee)).unwrap();
    }

    let ids: Vec<u64> = block_on(store.get_all())
        .unwrap()
        .iter()
        .filter_map(|employee| employee.id.map(EmployeeId::get))
        .collect();
    assert_eq!(ids, vec![5, 4, 3, 2, 1]);
}

#[test]
fn duplicate_email_is_rejected_on_add_and_update() {
    let store = ready_store();
    let first = block_on(store.add(&employee("Ayşe", "ayse@company.com"))).unwrap();
    block_on(store.add(&employee("Ali", "ali@company.com"))).unwrap();

    assert_eq!(
        block_on(store.add(&employee("Other", "ayse@company.com"))),
        Err(RosterError::DuplicateKey("email".to_string()))
    );

    let stolen = employee("Ayşe", "ali@company.com").with_id(first);
    assert_eq!(
        block_on(store.update(&stolen)),
        Err(RosterError::DuplicateKey("email".to_string()))
    );

    let unchanged = employee("Ayşe Nur", "ayse@company.com").with_id(first);
    block_on(store.update(&unchanged)).unwrap();
}

#[test]
fn remove_is_idempotent() {
    let store = ready_store();
    let id = block_on(store.add(&employee("Ayşe", "ayse@company.com"))).unwrap();

    block_on(store.remove(id)).unwrap();
    block_on(store.remove(id)).unwrap();

    assert_eq!(block_on(store.get_by_id(id)).unwrap(), None);
}

#[test]
fn ids_are_not_reused_after_remove_or_clear() {
    let store = ready_store();
    let first = block_on(store.add(&employee("A", "a@company.com"))).unwrap();
    block_on(store.remove(first)).unwrap();
    let second = block_on(store.add(&employee("B", "b@company.com"))).unwrap();
    block_on(store.clear()).unwrap();
    let third = block_on(store.add(&employee("C", "c@company.com"))).unwrap();

    assert!(first < second && second < third);
}

#[test]
fn non_atomic_batch_keeps_successful_entries() {
    let store = RecordStore::new(CountingEngine::new(Calls::default()).non_atomic());
    block_on(store.initialize()).unwrap();
    block_on(store.add(&employee("Taken", "dup@company.com"))).unwrap();

    let batch = vec![
        employee("A", "a@company.com"),
        employee("Dup", "dup@company.com"),
        employee("B", "b@company.com"),
    ];
    let report = block_on(store.add_batch(&batch)).unwrap();

    assert_eq!(report.inserted.len(), 2);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].0, 1);
    assert_eq!(report.rejected[0].1, RosterError::DuplicateKey("email".to_string()));
    assert!(!report.is_complete());
    assert_eq!(block_on(store.count()).unwrap(), 3);
}

#[test]
fn non_atomic_batch_fails_when_nothing_was_stored() {
    let store = RecordStore::new(CountingEngine::new(Calls::default()).non_atomic());
    block_on(store.initialize()).unwrap();
    block_on(store.add(&employee("Taken", "dup@company.com"))).unwrap();

    let result = block_on(store.add_batch(&[employee("Dup", "dup@company.com")]));

    assert_eq!(result, Err(RosterError::DuplicateKey("email".to_string())));
}

#[test]
fn json_store_persists_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees.json");

    let id = {
        let store = RecordStore::new(JsonFileEngine::new(&path));
        block_on(store.initialize()).unwrap();
        block_on(store.add(&employee("Ayşe", "ayse@company.com"))).unwrap()
    };

    let store = RecordStore::new(JsonFileEngine::new(&path));
    block_on(store.initialize()).unwrap();
    let stored = block_on(store.get_by_id(id)).unwrap().unwrap();

    assert_eq!(stored.email, "ayse@company.com");
    let next = block_on(store.add(&employee("Ali", "ali@company.com"))).unwrap();
    assert!(next > id);
}
