//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user intents and
//! worker responses, translating them into state changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the presentation layer or the worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Lifecycle**: `Startup`, `Reload`
//! - **Navigation**: `SelectView`, `ChangePage`, `NextPage`, `PreviousPage`, `SetLocale`
//! - **Deletion**: `RequestDelete`, `CancelDelete`, `ConfirmDelete`
//! - **Editing**: `SubmitNew`, `SubmitEdit`, `OpenEditor`, `CloseEditor`
//! - **Reset**: `ClearAll`
//! - **Worker**: `WorkerResponse` with typed message variants
//!
//! # Example
//!
//! ```rust
//! use roster::app::{handle_event, AppState, Event, ViewMode};
//! use roster::i18n::Locale;
//!
//! let mut state = AppState::new(4, ViewMode::Table, Locale::En);
//! let (render, actions) = handle_event(&mut state, &Event::SelectView(ViewMode::Grid))?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), roster::RosterError>(())
//! ```

use crate::app::actions::Notification;
use crate::app::modes::ViewMode;
use crate::app::state::LastError;
use crate::app::{Action, AppState};
use crate::domain::error::{Result, RosterError};
use crate::domain::{Employee, EmployeeId};
use crate::i18n::Locale;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user intent or worker responses.
///
/// The handler processes these sequentially, so state transitions are
/// deterministic for a given event order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Initializes the store, seeding it with `seed` if it is empty.
    Startup {
        seed: Vec<Employee>,
    },

    /// Reloads every record from the store.
    Reload,

    /// Switches between table and grid layout.
    SelectView(ViewMode),

    /// Jumps to a 1-based page. Ignored if out of range.
    ChangePage(usize),
    NextPage,
    PreviousPage,

    SetLocale(Locale),

    /// Opens the delete dialog for a record. Replaces any pending request.
    RequestDelete(Employee),

    /// Closes the delete dialog without touching the store.
    CancelDelete,

    /// Deletes the record the dialog was opened for.
    ConfirmDelete,

    /// Stores a record from the add form. The record must not carry an id.
    SubmitNew(Employee),

    /// Replaces a record from the edit form. The record must carry its id.
    SubmitEdit(Employee),

    /// Loads a record into the edit form.
    OpenEditor(EmployeeId),
    CloseEditor,

    /// Hides the last failure.
    DismissError,

    /// Deletes every record. Used by reset paths; no confirmation dialog.
    ClearAll,

    /// Wraps a response from the worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the view needs re-rendering, plus the actions to run in order.
///
/// # Errors
///
/// Returns [`RosterError::InvalidInput`] when an add submission carries an id
/// or an edit submission lacks one. Field-level validation failures are not
/// errors: they are recorded in `state.last_error` and reported as a
/// [`Notification::Failed`].
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Startup { seed } => {
            tracing::debug!(seed = seed.len(), "starting up");
            Ok((false, vec![Action::PostToWorker(WorkerMessage::Initialize {
                seed: seed.clone(),
            })]))
        }
        Event::Reload => Ok((false, vec![Action::PostToWorker(WorkerMessage::LoadEmployees)])),
        Event::SelectView(mode) => {
            if state.view_mode == *mode {
                return Ok((false, vec![]));
            }
            tracing::debug!(from = ?state.view_mode, to = ?mode, "switching view");
            state.view_mode = *mode;
            Ok((true, vec![]))
        }
        Event::ChangePage(page) => Ok((state.change_page(*page), vec![])),
        Event::NextPage => Ok((state.next_page(), vec![])),
        Event::PreviousPage => Ok((state.previous_page(), vec![])),
        Event::SetLocale(locale) => {
            let changed = state.locale != *locale;
            state.locale = *locale;
            Ok((changed, vec![]))
        }
        Event::RequestDelete(employee) => {
            if employee.id.is_none() {
                return Err(RosterError::InvalidInput(
                    "cannot delete a record that was never stored".to_string(),
                ));
            }
            tracing::debug!(id = ?employee.id, "deletion requested");
            state.request_delete(employee.clone());
            Ok((true, vec![]))
        }
        Event::CancelDelete => {
            let was_pending = state.cancel_delete();
            tracing::debug!(was_pending, "deletion cancelled");
            Ok((was_pending, vec![]))
        }
        Event::ConfirmDelete => {
            let Some(employee) = state.take_pending_delete() else {
                tracing::debug!("no deletion pending");
                return Ok((false, vec![]));
            };
            let Some(id) = employee.id else {
                return Ok((true, vec![]));
            };
            tracing::debug!(%id, "deletion confirmed");
            Ok((true, vec![Action::PostToWorker(WorkerMessage::RemoveEmployee { id })]))
        }
        Event::SubmitNew(employee) => {
            if let Some(id) = employee.id {
                return Err(RosterError::InvalidInput(format!(
                    "new employee must not carry an id (got {id})"
                )));
            }
            Ok(submit(state, employee, |employee| WorkerMessage::AddEmployee { employee }))
        }
        Event::SubmitEdit(employee) => {
            if employee.id.is_none() {
                return Err(RosterError::InvalidInput("edited employee has no id".to_string()));
            }
            Ok(submit(state, employee, |employee| WorkerMessage::UpdateEmployee { employee }))
        }
        Event::OpenEditor(id) => {
            if let Some(employee) = state.employee(*id).cloned() {
                state.editing = Some(employee);
                return Ok((true, vec![]));
            }
            tracing::debug!(%id, "record not loaded, fetching");
            Ok((false, vec![Action::PostToWorker(WorkerMessage::GetEmployee { id: *id })]))
        }
        Event::CloseEditor => Ok((state.editing.take().is_some(), vec![])),
        Event::DismissError => Ok((state.clear_error(), vec![])),
        Event::ClearAll => {
            tracing::debug!(loaded = state.employees.len(), "clearing store");
            Ok((false, vec![Action::PostToWorker(WorkerMessage::ClearEmployees)]))
        }
        Event::WorkerResponse(response) => Ok(handle_response(state, response)),
    }
}

/// Validates a form submission and posts it, or records why it was refused.
fn submit(
    state: &mut AppState,
    employee: &Employee,
    message: impl FnOnce(Employee) -> WorkerMessage,
) -> (bool, Vec<Action>) {
    if let Err(e) = employee.validate() {
        tracing::debug!(error = %e, "submission rejected");
        let failure = LastError::from(&e);
        state.last_error = Some(failure.clone());
        return (true, vec![Action::Notify(Notification::Failed {
            kind: failure.kind,
            message: failure.message,
        })]);
    }
    (false, vec![Action::PostToWorker(message(employee.clone()))])
}

fn handle_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    let reload = Action::PostToWorker(WorkerMessage::LoadEmployees);

    match response {
        WorkerResponse::Initialized { seeded } => {
            tracing::debug!(seeded, "store initialized");
            (false, vec![reload])
        }
        WorkerResponse::EmployeesLoaded { employees } => (state.set_employees(employees.clone()), vec![]),
        WorkerResponse::EmployeeFound { id, employee } => {
            if let Some(employee) = employee {
                state.editing = Some(employee.clone());
                return (true, vec![]);
            }
            let message = format!("no employee with id {id}");
            tracing::debug!(%id, "record to edit is gone");
            let error = RosterError::NotFound(message);
            state.last_error = Some(LastError::from(&error));
            (true, vec![Action::Notify(Notification::Failed {
                kind: error.kind(),
                message: error.to_string(),
            })])
        }
        WorkerResponse::EmployeeAdded { id } => {
            // new records sort first
            state.current_page = 1;
            (true, vec![
                Action::Notify(Notification::EmployeeAdded { id: *id }),
                reload,
            ])
        }
        WorkerResponse::EmployeeUpdated { id } => {
            state.editing = None;
            (true, vec![
                Action::Notify(Notification::EmployeeUpdated { id: *id }),
                reload,
            ])
        }
        WorkerResponse::EmployeeRemoved { id } => (false, vec![
            reload,
            Action::Notify(Notification::DeletionConfirmed { id: *id }),
        ]),
        WorkerResponse::Cleared => {
            let dropped_dialog = state.cancel_delete();
            let closed_editor = state.editing.take().is_some();
            (dropped_dialog || closed_editor, vec![reload])
        }
        WorkerResponse::Error { kind, message } => {
            tracing::error!(?kind, "worker error: {}", message);
            state.set_error(*kind, message.clone());
            (true, vec![Action::Notify(Notification::Failed {
                kind: *kind,
                message: message.clone(),
            })])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::DeleteConfirmation;
    use crate::domain::employee::sample_employee;
    use crate::domain::ErrorKind;

    fn id(raw: u64) -> EmployeeId {
        EmployeeId::new(raw).unwrap()
    }

    fn stored(raw: u64) -> Employee {
        sample_employee(&format!("E{raw}"), &format!("e{raw}@company.com")).with_id(id(raw))
    }

    fn state() -> AppState {
        let mut state = AppState::new(4, ViewMode::Table, Locale::En);
        state.set_employees((1..=5).rev().map(stored).collect());
        state
    }

    fn posted(actions: &[Action]) -> Vec<&WorkerMessage> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::PostToWorker(message) => Some(message),
                Action::Notify(_) => None,
            })
            .collect()
    }

    #[test]
    fn startup_initializes_then_reloads() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::Startup { seed: vec![] }).unwrap();
        assert_eq!(posted(&actions), vec![&WorkerMessage::Initialize { seed: vec![] }]);

        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Initialized { seeded: 0 }),
        )
        .unwrap();
        assert_eq!(posted(&actions), vec![&WorkerMessage::LoadEmployees]);
    }

    #[test]
    fn view_changes_only_on_explicit_selection() {
        let mut state = state();
        assert_eq!(handle_event(&mut state, &Event::SelectView(ViewMode::Table)).unwrap(), (false, vec![]));
        assert_eq!(handle_event(&mut state, &Event::SelectView(ViewMode::Grid)).unwrap(), (true, vec![]));
        handle_event(&mut state, &Event::Reload).unwrap();
        assert_eq!(state.view_mode, ViewMode::Grid);
    }

    #[test]
    fn cancel_never_posts_to_worker() {
        let mut state = state();
        handle_event(&mut state, &Event::RequestDelete(stored(3))).unwrap();
        let (render, actions) = handle_event(&mut state, &Event::CancelDelete).unwrap();

        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.confirmation, DeleteConfirmation::Idle);
    }

    #[test]
    fn confirm_removes_exactly_once() {
        let mut state = state();
        handle_event(&mut state, &Event::RequestDelete(stored(3))).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::ConfirmDelete).unwrap();
        assert_eq!(posted(&actions), vec![&WorkerMessage::RemoveEmployee { id: id(3) }]);

        let (_, actions) = handle_event(&mut state, &Event::ConfirmDelete).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn removal_reloads_and_notifies() {
        let mut state = state();
        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::EmployeeRemoved { id: id(3) }),
        )
        .unwrap();

        assert_eq!(actions, vec![
            Action::PostToWorker(WorkerMessage::LoadEmployees),
            Action::Notify(Notification::DeletionConfirmed { id: id(3) }),
        ]);
    }

    #[test]
    fn clear_all_posts_clear_and_reloads_on_success() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::ClearAll).unwrap();
        assert!(!render);
        assert_eq!(posted(&actions), vec![&WorkerMessage::ClearEmployees]);

        handle_event(&mut state, &Event::RequestDelete(stored(2))).unwrap();
        state.editing = Some(stored(4));

        let (render, actions) =
            handle_event(&mut state, &Event::WorkerResponse(WorkerResponse::Cleared)).unwrap();

        assert!(render);
        assert_eq!(actions, vec![Action::PostToWorker(WorkerMessage::LoadEmployees)]);
        assert_eq!(state.confirmation, DeleteConfirmation::Idle);
        assert_eq!(state.editing, None);
    }

    #[test]
    fn requesting_deletion_of_unsaved_record_is_invalid() {
        let mut state = state();
        let unsaved = sample_employee("New", "new@company.com");
        assert!(matches!(
            handle_event(&mut state, &Event::RequestDelete(unsaved)),
            Err(RosterError::InvalidInput(_))
        ));
    }

    #[test]
    fn submissions_check_id_presence() {
        let mut state = state();
        assert!(handle_event(&mut state, &Event::SubmitNew(stored(1))).is_err());
        assert!(handle_event(&mut state, &Event::SubmitEdit(sample_employee("A", "a@company.com"))).is_err());

        let (_, actions) =
            handle_event(&mut state, &Event::SubmitNew(sample_employee("A", "a@company.com"))).unwrap();
        assert!(matches!(posted(&actions)[..], [WorkerMessage::AddEmployee { .. }]));
    }

    #[test]
    fn invalid_submission_is_reported_not_posted() {
        let mut state = state();
        let (render, actions) =
            handle_event(&mut state, &Event::SubmitNew(sample_employee("A", "not-an-email"))).unwrap();

        assert!(render);
        assert!(posted(&actions).is_empty());
        assert_eq!(state.last_error.as_ref().map(|e| e.kind), Some(ErrorKind::InvalidInput));
    }

    #[test]
    fn paging_ignores_out_of_range() {
        let mut state = state();
        assert_eq!(handle_event(&mut state, &Event::ChangePage(7)).unwrap(), (false, vec![]));
        assert_eq!(handle_event(&mut state, &Event::NextPage).unwrap(), (true, vec![]));
        assert_eq!(state.current_page, 2);
        assert_eq!(handle_event(&mut state, &Event::NextPage).unwrap(), (false, vec![]));
    }

    #[test]
    fn worker_errors_are_kept_until_dismissed() {
        let mut state = state();
        let response = WorkerResponse::Error {
            kind: ErrorKind::DuplicateKey,
            message: "add employee: Duplicate key for unique index: email".to_string(),
        };
        let (_, actions) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();

        assert!(matches!(
            actions[..],
            [Action::Notify(Notification::Failed { kind: ErrorKind::DuplicateKey, .. })]
        ));
        assert!(state.last_error.is_some());
        assert!(handle_event(&mut state, &Event::DismissError).unwrap().0);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn editor_uses_loaded_record_or_fetches() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenEditor(id(2))).unwrap();
        assert_eq!(state.editing, Some(stored(2)));

        let (_, actions) = handle_event(&mut state, &Event::OpenEditor(id(42))).unwrap();
        assert_eq!(posted(&actions), vec![&WorkerMessage::GetEmployee { id: id(42) }]);
    }
}
