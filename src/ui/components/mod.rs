//! Composable UI component renderers.
//!
//! Each component appends the plain-text rendering of one part of the
//! interface to an output buffer.
//!
//! # Components
//!
//! - [`header`]: Title bar with view tabs
//! - [`table`]: Table rows or grid cards for the current page
//! - [`footer`]: Page-number bar
//! - [`dialog`]: Delete confirmation box
//! - [`empty`]: Empty state message for an empty store
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Border]
//! [Error line, if any]
//! [Table or Grid | Empty state]
//! [Border]
//! [Pagination]
//! [Dialog, if any]
//! ```

mod dialog;
mod empty;
mod footer;
mod header;
mod table;

use crate::ui::viewmodel::{Body, UIViewModel};

use dialog::render_dialog;
use empty::render_empty_state;
use footer::render_pagination;
use header::render_header;
use table::{render_grid, render_table};

/// Width of horizontal borders.
const BORDER_WIDTH: usize = 72;

fn render_border(out: &mut String) {
    out.push_str(&"─".repeat(BORDER_WIDTH));
    out.push('\n');
}

/// Left-aligns `text` in `width` characters, counting chars rather than bytes.
pub(crate) fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Renders every component of `vm` in layout order.
pub fn render_page(vm: &UIViewModel, out: &mut String) {
    render_header(&vm.header, out);
    render_border(out);

    if let Some(error) = &vm.error {
        out.push_str("! ");
        out.push_str(error);
        out.push('\n');
    }

    match (&vm.empty_state, &vm.body) {
        (Some(empty), _) => render_empty_state(empty, out),
        (None, Body::Table(table)) => render_table(table, out),
        (None, Body::Grid(cards)) => render_grid(cards, out),
    }

    render_border(out);
    render_pagination(&vm.pagination, out);

    if let Some(dialog) = &vm.dialog {
        render_dialog(dialog, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_counts_characters() {
        assert_eq!(pad("Işık", 6), "Işık  ");
        assert_eq!(pad("toolong", 3), "toolong");
    }
}
