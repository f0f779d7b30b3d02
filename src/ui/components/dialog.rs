//! Delete confirmation dialog renderer.

use crate::ui::viewmodel::DialogInfo;

/// Renders the dialog as a boxed block below the page.
pub fn render_dialog(dialog: &DialogInfo, out: &mut String) {
    let buttons = format!("[{}]  [{}]", dialog.proceed_label, dialog.cancel_label);
    let width = [dialog.title.as_str(), dialog.message.as_str(), buttons.as_str()]
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    out.push('\n');
    out.push_str(&format!("┌{}┐\n", "─".repeat(width + 2)));
    for line in [&dialog.title, &dialog.message, &buttons] {
        out.push_str(&format!("│ {} │\n", super::pad(line, width)));
    }
    out.push_str(&format!("└{}┘\n", "─".repeat(width + 2)));
}
