//! User interface rendering layer with component-based architecture.
//!
//! This module transforms view models into plain-text output through
//! composable rendering components.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → Text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers

pub mod components;
pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use viewmodel::{
    Body, Card, DialogInfo, EmptyState, HeaderInfo, PaginationInfo, TableRow, TableView,
    UIViewModel, ViewTab,
};
