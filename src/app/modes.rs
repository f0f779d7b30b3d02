//! View mode and delete-confirmation state types.
//!
//! The coordinator tracks two independent state machines:
//!
//! - **View mode**: `Table` or `Grid`, changed only by explicit selection
//! - **Delete confirmation**: `Idle` or `Pending(record)`; a new request while
//!   one is pending replaces it, since only one dialog exists at a time
//!
//! # Example
//!
//! ```rust
//! use roster::app::modes::{DeleteConfirmation, ViewMode};
//!
//! let view = ViewMode::default();
//! assert_eq!(view, ViewMode::Table);
//! assert!(DeleteConfirmation::Idle.pending().is_none());
//! ```

use crate::domain::error::{Result, RosterError};
use crate::domain::Employee;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the record list is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One row per record with every field as a column.
    #[default]
    Table,

    /// One card per record.
    Grid,
}

impl ViewMode {
    /// Localization key of the view's name.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Table => "views.table",
            Self::Grid => "views.grid",
        }
    }
}

impl FromStr for ViewMode {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "grid" => Ok(Self::Grid),
            other => Err(RosterError::InvalidInput(format!("unknown view: {other}"))),
        }
    }
}

/// Delete-confirmation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteConfirmation {
    /// No deletion requested.
    #[default]
    Idle,

    /// Waiting for the user to confirm deleting this record.
    Pending(Employee),
}

impl DeleteConfirmation {
    /// The record awaiting confirmation, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&Employee> {
        match self {
            Self::Idle => None,
            Self::Pending(employee) => Some(employee),
        }
    }
}
