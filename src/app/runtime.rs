//! Event loop driving the handler and the worker.
//!
//! [`Runtime::dispatch`] feeds one event to [`handle_event`], executes the
//! resulting actions in order and feeds every worker response back in as a new
//! event, until no work is left. Notifications are collected for the caller.

use crate::app::actions::Notification;
use crate::app::{handle_event, Action, AppState, Event};
use crate::domain::error::Result;
use crate::storage::{Engine, RecordStore};
use crate::worker::RosterWorker;
use std::collections::VecDeque;

/// What one dispatched event produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Whether any step changed what the view shows.
    pub should_render: bool,

    /// Notifications in emission order.
    pub notifications: Vec<Notification>,
}

/// Owns the application state and the worker.
pub struct Runtime<E> {
    state: AppState,
    worker: RosterWorker<E>,
}

impl<E: Engine + 'static> Runtime<E> {
    pub const fn new(state: AppState, worker: RosterWorker<E>) -> Self {
        Self { state, worker }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn store(&self) -> &RecordStore<E> {
        self.worker.store()
    }

    /// Handles `event` and everything it triggers.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`handle_event`]. Store failures are
    /// not errors here; they arrive as [`Notification::Failed`].
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn dispatch(&mut self, event: Event) -> Result<DispatchOutcome> {
        let mut outcome = DispatchOutcome::default();
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let (render, actions) = handle_event(&mut self.state, &event)?;
            outcome.should_render |= render;

            for action in actions {
                match action {
                    Action::PostToWorker(message) => {
                        let response = self.worker.handle(message).await;
                        queue.push_back(Event::WorkerResponse(response));
                    }
                    Action::Notify(notification) => {
                        tracing::debug!(?notification, "notification emitted");
                        outcome.notifications.push(notification);
                    }
                }
            }
        }

        Ok(outcome)
    }
}
