//! Domain layer for the roster.
//!
//! This module contains the core domain types, independent of storage engines
//! and presentation concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types, error kinds and result alias
//! - [`employee`]: Employee record, catalogs and field validation
//!
//! # Examples
//!
//! ```
//! use roster::domain::{Department, Position};
//!
//! let department: Department = "Finance".parse()?;
//! assert_eq!(department.as_str(), "Finance");
//! assert_eq!(Position::HrManager.to_string(), "HR Manager");
//! # Ok::<(), roster::RosterError>(())
//! ```

pub mod employee;
pub mod error;

pub use employee::{parse_date, Department, Employee, EmployeeId, Position};
pub use error::{ErrorKind, Result, RosterError};
