//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They hold
//! localized, display-ready text and no business logic.
//!
//! # Example
//!
//! ```rust
//! use roster::app::pagination::PageSlot;
//! use roster::ui::viewmodel::PaginationInfo;
//!
//! let pagination = PaginationInfo {
//!     slots: vec![PageSlot::Page(1)],
//!     current_page: 1,
//!     total_pages: 1,
//!     previous_enabled: false,
//!     next_enabled: false,
//!     previous_label: "‹".to_string(),
//!     next_label: "›".to_string(),
//!     summary: "Page 1 of 1".to_string(),
//! };
//! assert!(!pagination.next_enabled);
//! ```

use crate::app::pagination::PageSlot;
use crate::domain::EmployeeId;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Title bar with view switcher.
    pub header: HeaderInfo,

    /// Records of the current page in the active layout.
    pub body: Body,

    /// Page-number bar.
    pub pagination: PaginationInfo,

    /// Delete confirmation dialog, shown while a deletion is pending.
    pub dialog: Option<DialogInfo>,

    /// Shown instead of the body when no records exist.
    pub empty_state: Option<EmptyState>,

    /// Localized message of the last failure, until dismissed.
    pub error: Option<String>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,

    /// Label of the "add new" entry point.
    pub add_label: String,

    /// One tab per view mode, in declaration order.
    pub views: Vec<ViewTab>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTab {
    pub label: String,
    pub active: bool,
}

/// Records laid out for the active view mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Table(TableView),
    Grid(Vec<Card>),
}

impl Body {
    /// Number of records shown.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Table(table) => table.rows.len(),
            Self::Grid(cards) => cards.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Column headers plus one row of cells per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: Option<EmployeeId>,

    /// Cell text in column order.
    pub cells: Vec<String>,
}

/// One record in grid layout: a title and labelled fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: Option<EmployeeId>,
    pub title: String,
    pub fields: Vec<(String, String)>,
}

/// Page-number bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    pub slots: Vec<PageSlot>,
    pub current_page: usize,
    pub total_pages: usize,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub previous_label: String,
    pub next_label: String,

    /// Localized "page X of Y" text.
    pub summary: String,
}

/// Delete confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogInfo {
    pub title: String,

    /// Names the record that will be deleted.
    pub message: String,
    pub proceed_label: String,
    pub cancel_label: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No employees found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
