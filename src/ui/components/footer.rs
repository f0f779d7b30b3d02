//! Pagination bar renderer.

use crate::app::pagination::PageSlot;
use crate::ui::viewmodel::PaginationInfo;

/// Renders the page-number bar followed by the page summary.
///
/// The current page is bracketed and disabled arrows are blanked:
///
/// ```text
/// ‹ 1 ... 4 [5] 6 ... 10 ›    Page 5 of 10
/// ```
pub fn render_pagination(pagination: &PaginationInfo, out: &mut String) {
    let mut parts = Vec::with_capacity(pagination.slots.len() + 2);

    parts.push(arrow(&pagination.previous_label, pagination.previous_enabled));
    for slot in &pagination.slots {
        match slot {
            PageSlot::Page(page) if *page == pagination.current_page => parts.push(format!("[{page}]")),
            other => parts.push(other.to_string()),
        }
    }
    parts.push(arrow(&pagination.next_label, pagination.next_enabled));

    out.push_str(&format!("{}    {}\n", parts.join(" "), pagination.summary));
}

fn arrow(label: &str, enabled: bool) -> String {
    if enabled {
        label.to_string()
    } else {
        " ".repeat(label.chars().count())
    }
}
