//! Worker layer executing store operations on behalf of the coordinator.
//!
//! The coordinator never touches the store directly: it emits
//! [`WorkerMessage`]s, the runtime hands them to a [`RosterWorker`], and the
//! resulting [`WorkerResponse`] is fed back to the coordinator as an event.

pub mod handler;
pub mod messages;

pub use handler::RosterWorker;
pub use messages::{WorkerMessage, WorkerResponse};
