//! Roster: employee records with paginated, bilingual table and grid views.
//!
//! Roster provides:
//! - An async record store over a pluggable storage engine, with a unique
//!   email index and auto-increment ids that are never reused
//! - A pure pagination engine with a collapsing page-number list
//! - A view-state coordinator for table/grid layout, paging, editing and
//!   delete confirmation
//! - English and Turkish labels
//! - A command-line front end (`roster`)

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Pagination                                       │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Worker Layer  │   │ i18n          │
//! │ (ui/)         │   │ (worker/)     │   │ (i18n/)       │
//! │ - Rendering   │   │ - Messages    │   │ - Catalog     │
//! │ - Components  │   │ - Store calls │   │ - Locales     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage Layer (storage/)                           │
//! │  - Record store (async, shared initialization)      │
//! │  - Engine trait, memory and JSON file engines       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data paths (infrastructure/)                     │
//! │  - Error types (domain/error)                       │
//! │  - Employee model (domain/employee)                 │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core domain types (Employee, errors)
//! - [`i18n`]: Label catalog and locales
//! - [`infrastructure`]: Data and log paths
//! - [`storage`]: Record store and storage engines
//! - [`worker`]: Executes store operations for the coordinator
//! - [`ui`]: Plain-text rendering
//! - [`observability`]: Rotating log file setup
//!
//! # Configuration
//!
//! ```toml
//! # roster.toml
//! data_dir = "~/.local/share/roster"
//! items_per_page = 4
//! default_view = "table"
//! locale = "tr"
//! seed_on_empty = true
//! trace_level = "info"
//! ```
//!
//! # Example
//!
//! ```rust
//! use roster::storage::MemoryEngine;
//! use roster::{initialize, Config, Event};
//!
//! # futures::executor::block_on(async {
//! let config = Config { seed_on_empty: false, ..Config::default() };
//! let mut runtime = initialize(&config, MemoryEngine::new());
//!
//! runtime.dispatch(roster::startup_event(&config)?).await?;
//! runtime.dispatch(Event::NextPage).await?;
//! assert_eq!(runtime.state().current_page, 1);
//! # Ok::<(), roster::RosterError>(())
//! # })?;
//! # Ok::<(), roster::RosterError>(())
//! ```

pub mod app;
pub mod domain;
pub mod i18n;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, Runtime, ViewMode};
pub use domain::{Employee, EmployeeId, ErrorKind, Result, RosterError};
pub use i18n::{Catalog, Locale};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use storage::{seed_employees, Engine, JsonFileEngine, RecordStore};
use worker::RosterWorker;

/// Default number of records per page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 4;

/// Runtime configuration.
///
/// # Example
///
/// ```toml
/// items_per_page = 10
/// default_view = "grid"
/// locale = "en"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the JSON store and the log file.
    ///
    /// `~` is expanded. `ROSTER_DATA_DIR` overrides it. Default:
    /// `$HOME/.local/share/roster`
    pub data_dir: Option<String>,

    /// Records per page. Must be at least 1. Default: 4
    pub items_per_page: usize,

    /// Layout shown on startup. Default: `table`
    pub default_view: ViewMode,

    /// Label language. Default: `tr`
    pub locale: Locale,

    /// Insert the bundled sample records when the store is empty. Default: true
    pub seed_on_empty: bool,

    /// Log level directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. `RUST_LOG` takes
    /// precedence. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            default_view: ViewMode::default(),
            locale: Locale::default(),
            seed_on_empty: true,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string map, falling back to defaults for
    /// missing keys.
    ///
    /// # Parsing Rules
    ///
    /// - `data_dir`, `trace_level`: taken as is
    /// - `items_per_page`: positive integer
    /// - `default_view`: `table` or `grid`
    /// - `locale`: `en` or `tr`
    /// - `seed_on_empty`: `true` or `false`
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Config`] naming the first key whose value does
    /// not parse, or if `items_per_page` is 0.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use roster::{Config, ViewMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("items_per_page".to_string(), "10".to_string());
    /// map.insert("default_view".to_string(), "grid".to_string());
    ///
    /// let config = Config::from_map(&map)?;
    /// assert_eq!(config.items_per_page, 10);
    /// assert_eq!(config.default_view, ViewMode::Grid);
    /// # Ok::<(), roster::RosterError>(())
    /// ```
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        let defaults = Self::default();
        let invalid = |key: &str, value: &str| {
            RosterError::Config(format!("invalid value for {key}: {value:?}"))
        };

        let items_per_page = match map.get("items_per_page") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|_| invalid("items_per_page", value))?,
            None => defaults.items_per_page,
        };
        let default_view = match map.get("default_view") {
            Some(value) => value.parse().map_err(|_| invalid("default_view", value))?,
            None => defaults.default_view,
        };
        let locale = match map.get("locale") {
            Some(value) => value.parse().map_err(|_| invalid("locale", value))?,
            None => defaults.locale,
        };
        let seed_on_empty = match map.get("seed_on_empty") {
            Some(value) => value
                .trim()
                .parse::<bool>()
                .map_err(|_| invalid("seed_on_empty", value))?,
            None => defaults.seed_on_empty,
        };

        let config = Self {
            data_dir: map.get("data_dir").cloned(),
            items_per_page,
            default_view,
            locale,
            seed_on_empty,
            trace_level: map.get("trace_level").cloned(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Config`] if the file cannot be read, is not
    /// valid TOML, has unknown keys, or fails validation.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            RosterError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&source)?;
        config.validate()?;
        tracing::debug!(path = ?path, "configuration loaded");
        Ok(config)
    }

    /// Checks cross-field rules.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Config`] if `items_per_page` is 0.
    pub fn validate(&self) -> Result<()> {
        if self.items_per_page == 0 {
            return Err(RosterError::Config("items_per_page must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Builds a runtime over `engine` with state taken from `config`.
///
/// The store is not opened until the [`startup_event`] is dispatched.
pub fn initialize<E: Engine + 'static>(config: &Config, engine: E) -> Runtime<E> {
    tracing::debug!(
        items_per_page = config.items_per_page,
        view = ?config.default_view,
        locale = %config.locale,
        "initializing roster"
    );

    let state = AppState::new(config.items_per_page, config.default_view, config.locale);
    Runtime::new(state, RosterWorker::new(RecordStore::new(engine)))
}

/// Builds a runtime persisting to `employees.json` in the data directory.
pub fn initialize_json(config: &Config) -> Runtime<JsonFileEngine> {
    let path = infrastructure::get_data_dir(config).join(infrastructure::DATA_FILE_NAME);
    tracing::debug!(path = ?path, "using JSON file store");
    initialize(config, JsonFileEngine::new(path))
}

/// The first event to dispatch: initializes the store, with the bundled
/// sample records as seed when `seed_on_empty` is set.
///
/// # Errors
///
/// Returns [`RosterError::InvalidInput`] if the bundled sample records do not parse.
pub fn startup_event(config: &Config) -> Result<Event> {
    let seed = if config.seed_on_empty {
        seed_employees()?
    } else {
        vec![]
    };
    Ok(Event::Startup { seed })
}
