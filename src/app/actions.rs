//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! runtime executes them in order: worker messages are sent to the store and
//! their responses fed back as events, notifications are handed to the
//! presentation layer.
//!
//! # Example
//!
//! ```rust
//! use roster::app::Action;
//! use roster::worker::WorkerMessage;
//!
//! let actions = vec![Action::PostToWorker(WorkerMessage::LoadEmployees)];
//! ```

use crate::domain::{EmployeeId, ErrorKind};
use crate::worker::WorkerMessage;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Runs a store operation through the worker.
    PostToWorker(WorkerMessage),

    /// Tells the presentation layer something happened.
    Notify(Notification),
}

/// Outward notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A confirmed deletion reached the store; the list has been reloaded.
    DeletionConfirmed {
        id: EmployeeId,
    },

    /// A new record was stored.
    EmployeeAdded {
        id: EmployeeId,
    },

    /// An existing record was replaced.
    EmployeeUpdated {
        id: EmployeeId,
    },

    /// A store operation failed. Shown as a blocking message.
    Failed {
        kind: ErrorKind,
        message: String,
    },
}
