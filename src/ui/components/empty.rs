//! Empty state component renderer.
//!
//! Renders the message displayed when the store holds no records.

use crate::ui::viewmodel::EmptyState;

/// Renders the empty state message and its subtitle, indented and separated by
/// blank lines.
pub fn render_empty_state(empty: &EmptyState, out: &mut String) {
    out.push('\n');
    out.push_str(&format!("    {}\n", empty.message));
    out.push_str(&format!("    {}\n", empty.subtitle));
    out.push('\n');
}
