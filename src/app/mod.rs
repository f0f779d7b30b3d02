//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the binary (main.rs) and the
//! domain/storage/worker layers. It implements the event-driven view-state
//! coordinator that decides what the presentation layer shows.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Intent → Events → Event Handler → State Mutations → Actions → Side Effects
//!                            ↑                                   ↓
//!                            └──────── Worker Responses ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: View mode and delete-confirmation state machine types
//! - [`pagination`]: Pure page window and page-number list computation
//! - [`runtime`]: Event loop executing actions against the worker
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use roster::app::{handle_event, AppState, Event, ViewMode};
//! use roster::i18n::Locale;
//!
//! let mut state = AppState::new(4, ViewMode::Table, Locale::Tr);
//! let (render, actions) = handle_event(&mut state, &Event::NextPage)?;
//! assert!(!render);
//! # Ok::<(), roster::RosterError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod pagination;
pub mod runtime;
pub mod state;

pub use actions::{Action, Notification};
pub use handler::{handle_event, Event};
pub use modes::{DeleteConfirmation, ViewMode};
pub use runtime::{DispatchOutcome, Runtime};
pub use state::{AppState, LastError};
