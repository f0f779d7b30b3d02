//! Error types for roster operations.
//!
//! This module defines the centralized error type [`RosterError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Errors carry string payloads rather than wrapped source errors so they stay
//! `Clone`: a shared initialization future hands the same error to every caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for roster operations.
///
/// # Examples
///
/// ```
/// use roster::domain::{ErrorKind, RosterError};
///
/// let err = RosterError::DuplicateKey("email".to_string());
/// assert_eq!(err.kind(), ErrorKind::DuplicateKey);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// The storage engine is not opened, was lost, or failed underneath.
    ///
    /// Also returned by every record operation attempted before a successful
    /// `initialize`. I/O and serialization failures convert into this variant.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A unique index rejected the write.
    ///
    /// The string names the offending index (e.g. `email`).
    #[error("Duplicate key for unique index: {0}")]
    DuplicateKey(String),

    /// The target of an update does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller supplied a malformed record or key.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Discriminant of [`RosterError`], used by the presentation layer to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    StoreUnavailable,
    DuplicateKey,
    NotFound,
    InvalidInput,
    Config,
}

impl ErrorKind {
    /// Localization key describing this kind of failure.
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::StoreUnavailable => "errors.storeUnavailable",
            Self::DuplicateKey => "errors.duplicateKey",
            Self::NotFound => "errors.notFound",
            Self::InvalidInput => "errors.invalidInput",
            Self::Config => "errors.config",
        }
    }
}

impl RosterError {
    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
            Self::DuplicateKey(_) => ErrorKind::DuplicateKey,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<std::io::Error> for RosterError {
    fn from(err: std::io::Error) -> Self {
        Self::StoreUnavailable(format!("I/O error: {err}"))
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        Self::StoreUnavailable(format!("serialization error: {err}"))
    }
}

impl From<toml::de::Error> for RosterError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A specialized `Result` type for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;
