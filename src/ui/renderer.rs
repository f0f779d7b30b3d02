//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component renderers
//!
//! Output is plain text; the caller decides where it goes.
//!
//! # Example
//!
//! ```rust
//! use roster::app::{AppState, ViewMode};
//! use roster::i18n::{Catalog, Locale};
//! use roster::ui::render;
//!
//! let state = AppState::new(4, ViewMode::Table, Locale::En);
//! let text = render(&state, &Catalog::builtin()?);
//! assert!(text.contains("No employees found"));
//! # Ok::<(), roster::RosterError>(())
//! ```

use crate::app::AppState;
use crate::i18n::Translate;
use crate::ui::components;
use crate::ui::viewmodel::UIViewModel;

/// Renders the current state with labels from `catalog`.
#[must_use]
pub fn render(state: &AppState, catalog: &impl Translate) -> String {
    let viewmodel = state.compute_viewmodel(catalog);
    render_viewmodel(&viewmodel)
}

/// Renders a pre-computed view model.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel) -> String {
    let mut out = String::new();
    components::render_page(vm, &mut out);
    out
}
