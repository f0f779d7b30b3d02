//! Table and grid component renderers.
//!
//! The table renders one row per record with column widths fitted to the
//! widest cell. The grid renders one card per record: the full name as title
//! followed by labelled fields.

use super::pad;
use crate::ui::viewmodel::{Card, TableView};

/// Gap between table columns.
const COLUMN_GAP: &str = "  ";

/// Renders the column headers and one line per row.
///
/// # Layout
///
/// ```text
/// #   First Name  Last Name  ...
/// 12  Ahmet       Yılmaz     ...
/// ```
pub fn render_table(table: &TableView, out: &mut String) {
    let id_width = table
        .rows
        .iter()
        .map(|row| row.id.map_or(0, |id| id.to_string().len()))
        .max()
        .unwrap_or(0)
        .max(1);

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.cells.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad(column, *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    out.push_str(&format!("{}{COLUMN_GAP}{}\n", pad("#", id_width), header.trim_end()));

    for row in &table.rows {
        let id = row.id.map(|id| id.to_string()).unwrap_or_default();
        let cells = row
            .cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        out.push_str(&format!("{}{COLUMN_GAP}{}\n", pad(&id, id_width), cells.trim_end()));
    }
}

/// Renders each card as a titled block separated by blank lines.
pub fn render_grid(cards: &[Card], out: &mut String) {
    let label_width = cards
        .iter()
        .flat_map(|card| card.fields.iter())
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    for (index, card) in cards.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let id = card.id.map(|id| format!(" #{id}")).unwrap_or_default();
        out.push_str(&format!("{}{id}\n", card.title));
        for (label, value) in &card.fields {
            out.push_str(&format!("  {}  {value}\n", pad(label, label_width)));
        }
    }
}
