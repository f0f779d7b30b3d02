//! Bundled sample employees.
//!
//! Inserted in one batch on first start when the store is empty and
//! `seed_on_empty` is enabled.

use crate::domain::error::{Result, RosterError};
use crate::domain::Employee;

const SEED_JSON: &str = include_str!("../../data/employees.json");

/// Parses the bundled sample employees.
///
/// # Errors
///
/// Returns [`RosterError::InvalidInput`] if the bundled file does not decode,
/// which only happens if it was edited by hand.
pub fn seed_employees() -> Result<Vec<Employee>> {
    serde_json::from_str(SEED_JSON)
        .map_err(|e| RosterError::InvalidInput(format!("bundled seed data is malformed: {e}")))
}
