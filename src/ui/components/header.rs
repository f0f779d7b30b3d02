//! Header component renderer.

use crate::ui::viewmodel::HeaderInfo;

/// Renders the title, the view tabs and the add label on one line.
///
/// The active tab is wrapped in brackets:
///
/// ```text
/// Employee List    [Table] Grid    + Add New
/// ```
pub fn render_header(header: &HeaderInfo, out: &mut String) {
    let tabs: Vec<String> = header
        .views
        .iter()
        .map(|tab| {
            if tab.active {
                format!("[{}]", tab.label)
            } else {
                tab.label.clone()
            }
        })
        .collect();

    out.push_str(&format!(
        "{}    {}    + {}\n",
        header.title,
        tabs.join(" "),
        header.add_label
    ));
}
