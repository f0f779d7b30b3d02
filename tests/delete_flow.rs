//! Delete confirmation and page clamping through the runtime.

mod common;

use common::employees;
use futures::executor::block_on;
use roster::app::{DeleteConfirmation, Notification, Runtime};
use roster::storage::{Engine, JsonFileEngine, MemoryEngine};
use roster::{initialize, startup_event, Config, Event};

fn started<E: Engine + 'static>(engine: E, count: usize) -> Runtime<E> {
    let mut runtime = initialize(&Config::default(), engine);
    block_on(runtime.dispatch(Event::Startup { seed: employees(count) })).unwrap();
    runtime
}

#[test]
fn cancel_never_removes() {
    let mut runtime = started(MemoryEngine::new(), 3);
    let target = runtime.state().employees[0].clone();

    block_on(runtime.dispatch(Event::RequestDelete(target))).unwrap();
    assert!(matches!(runtime.state().confirmation, DeleteConfirmation::Pending(_)));

    let outcome = block_on(runtime.dispatch(Event::CancelDelete)).unwrap();

    assert!(outcome.notifications.is_empty());
    assert_eq!(runtime.state().confirmation, DeleteConfirmation::Idle);
    assert_eq!(block_on(runtime.store().count()).unwrap(), 3);
}

#[test]
fn confirm_removes_exactly_once() {
    let mut runtime = started(MemoryEngine::new(), 3);
    let target = runtime.state().employees[1].clone();
    let id = target.id.unwrap();

    block_on(runtime.dispatch(Event::RequestDelete(target))).unwrap();
    let outcome = block_on(runtime.dispatch(Event::ConfirmDelete)).unwrap();

    assert_eq!(outcome.notifications, vec![Notification::DeletionConfirmed { id }]);
    assert_eq!(runtime.state().employees.len(), 2);
    assert!(runtime.state().employee(id).is_none());

    let again = block_on(runtime.dispatch(Event::ConfirmDelete)).unwrap();
    assert!(!again.should_render);
    assert!(again.notifications.is_empty());
    assert_eq!(block_on(runtime.store().count()).unwrap(), 2);
}

#[test]
fn deleting_last_record_of_last_page_moves_back_a_page() {
    let mut runtime = started(MemoryEngine::new(), 5);
    block_on(runtime.dispatch(Event::ChangePage(2))).unwrap();
    assert_eq!(runtime.state().current_page, 2);
    assert_eq!(runtime.state().visible_employees().len(), 1);

    let target = runtime.state().visible_employees()[0].clone();
    block_on(runtime.dispatch(Event::RequestDelete(target))).unwrap();
    block_on(runtime.dispatch(Event::ConfirmDelete)).unwrap();

    assert_eq!(runtime.state().total_pages(), 1);
    assert_eq!(runtime.state().current_page, 1);
    assert_eq!(runtime.state().visible_employees().len(), 4);
}

#[test]
fn bundled_seed_fills_an_empty_json_store_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees.json");
    let config = Config::default();

    let mut runtime = initialize(&config, JsonFileEngine::new(&path));
    block_on(runtime.dispatch(startup_event(&config).unwrap())).unwrap();
    assert_eq!(runtime.state().employees.len(), 30);
    assert_eq!(runtime.state().total_pages(), 8);

    let target = runtime.state().employees[0].clone();
    block_on(runtime.dispatch(Event::RequestDelete(target))).unwrap();
    block_on(runtime.dispatch(Event::ConfirmDelete)).unwrap();
    drop(runtime);

    let mut reopened = initialize(&config, JsonFileEngine::new(&path));
    block_on(reopened.dispatch(startup_event(&config).unwrap())).unwrap();
    assert_eq!(reopened.state().employees.len(), 29);
}
