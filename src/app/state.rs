//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single source of truth for everything
//! the presentation layer shows: the loaded records, the current page, the view
//! mode, the delete dialog, the active locale and the last failure.
//!
//! # Architecture
//!
//! `AppState` holds the full record list as loaded from the store and derives
//! the visible page from it on demand. Page-changing requests outside
//! `1..=total_pages` are ignored; replacing the record list clamps the current
//! page back into range.
//!
//! # Example
//!
//! ```rust
//! use roster::app::{AppState, ViewMode};
//! use roster::i18n::{Catalog, Locale};
//!
//! let state = AppState::new(4, ViewMode::Table, Locale::En);
//! let catalog = Catalog::builtin()?;
//! let viewmodel = state.compute_viewmodel(&catalog);
//! assert!(viewmodel.empty_state.is_some());
//! # Ok::<(), roster::RosterError>(())
//! ```

use super::modes::{DeleteConfirmation, ViewMode};
use super::pagination;
use crate::domain::{Employee, EmployeeId, ErrorKind, RosterError};
use crate::i18n::{Locale, Translate};
use crate::ui::viewmodel::{
    Body, Card, DialogInfo, EmptyState, HeaderInfo, PaginationInfo, TableRow, TableView,
    UIViewModel, ViewTab,
};

/// Display format for dates in tables and cards.
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Localization keys of the record fields, in column order.
const FIELD_KEYS: [&str; 8] = [
    "table.firstName",
    "table.lastName",
    "table.dateOfEmployment",
    "table.dateOfBirth",
    "table.phone",
    "table.email",
    "table.department",
    "table.position",
];

/// A failure kept for display until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&RosterError> for LastError {
    fn from(error: &RosterError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Every stored record, newest id first.
    pub employees: Vec<Employee>,

    /// 1-based page shown, always within `1..=total_pages()`.
    pub current_page: usize,

    /// Records per page, at least 1.
    pub items_per_page: usize,

    pub view_mode: ViewMode,

    /// Delete dialog state.
    pub confirmation: DeleteConfirmation,

    pub locale: Locale,

    /// Last failure reported by the store, until dismissed.
    pub last_error: Option<LastError>,

    /// Record loaded into the edit form, if one is open.
    pub editing: Option<Employee>,
}

impl AppState {
    /// Creates an empty state on page 1.
    ///
    /// An `items_per_page` of 0 is treated as 1.
    #[must_use]
    pub fn new(items_per_page: usize, view_mode: ViewMode, locale: Locale) -> Self {
        Self {
            employees: vec![],
            current_page: 1,
            items_per_page: items_per_page.max(1),
            view_mode,
            confirmation: DeleteConfirmation::Idle,
            locale,
            last_error: None,
            editing: None,
        }
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.employees.len(), self.items_per_page)
    }

    /// Records on the current page.
    #[must_use]
    pub fn visible_employees(&self) -> &[Employee] {
        pagination::slice(&self.employees, self.current_page, self.items_per_page)
    }

    /// Moves to `page`. Returns `false` and changes nothing if `page` is out of range.
    pub fn change_page(&mut self, page: usize) -> bool {
        if !pagination::is_valid_page(page, self.total_pages()) {
            tracing::debug!(page, total = self.total_pages(), "ignoring out-of-range page");
            return false;
        }
        if page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.change_page(self.current_page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        self.current_page > 1 && self.change_page(self.current_page - 1)
    }

    /// Replaces the record list and clamps the current page.
    ///
    /// Returns whether anything visible changed.
    pub fn set_employees(&mut self, employees: Vec<Employee>) -> bool {
        let page = pagination::clamp_page(
            self.current_page,
            pagination::total_pages(employees.len(), self.items_per_page),
        );
        if employees == self.employees && page == self.current_page {
            tracing::debug!("employees unchanged");
            return false;
        }

        tracing::debug!(
            count = employees.len(),
            from_page = self.current_page,
            to_page = page,
            "employees replaced"
        );
        self.employees = employees;
        self.current_page = page;
        true
    }

    /// Looks up a loaded record.
    #[must_use]
    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == Some(id))
    }

    /// Opens the delete dialog for `employee`, replacing any pending request.
    pub fn request_delete(&mut self, employee: Employee) {
        if let Some(previous) = self.confirmation.pending() {
            tracing::debug!(previous = ?previous.id, next = ?employee.id, "replacing pending deletion");
        }
        self.confirmation = DeleteConfirmation::Pending(employee);
    }

    /// Closes the delete dialog. Returns whether one was open.
    pub fn cancel_delete(&mut self) -> bool {
        let was_pending = self.confirmation.pending().is_some();
        self.confirmation = DeleteConfirmation::Idle;
        was_pending
    }

    /// Closes the delete dialog, handing back the record it was for.
    pub fn take_pending_delete(&mut self) -> Option<Employee> {
        match std::mem::take(&mut self.confirmation) {
            DeleteConfirmation::Pending(employee) => Some(employee),
            DeleteConfirmation::Idle => None,
        }
    }

    pub fn set_error(&mut self, kind: ErrorKind, message: impl Into<String>) {
        self.last_error = Some(LastError {
            kind,
            message: message.into(),
        });
    }

    /// Clears the last failure. Returns whether there was one.
    pub fn clear_error(&mut self) -> bool {
        self.last_error.take().is_some()
    }

    /// Computes a renderable UI view model with labels from `catalog`.
    #[must_use]
    pub fn compute_viewmodel(&self, catalog: &impl Translate) -> UIViewModel {
        let t = |key: &str| catalog.translate(self.locale, key, &[]);

        let empty_state = self.employees.is_empty().then(|| EmptyState {
            message: t("empty.message"),
            subtitle: t("empty.subtitle"),
        });

        let visible = self.visible_employees();
        let body = match self.view_mode {
            ViewMode::Table => Body::Table(TableView {
                columns: FIELD_KEYS.iter().map(|&key| t(key)).collect(),
                rows: visible
                    .iter()
                    .map(|employee| TableRow {
                        id: employee.id,
                        cells: field_values(employee).to_vec(),
                    })
                    .collect(),
            }),
            ViewMode::Grid => Body::Grid(
                visible
                    .iter()
                    .map(|employee| Card {
                        id: employee.id,
                        title: employee.full_name(),
                        fields: FIELD_KEYS
                            .iter()
                            .zip(field_values(employee))
                            .skip(2)
                            .map(|(&key, value)| (t(key), value))
                            .collect(),
                    })
                    .collect(),
            ),
        };

        let dialog = self.confirmation.pending().map(|employee| DialogInfo {
            title: t("dialog.title"),
            message: catalog.translate(
                self.locale,
                "dialog.message",
                &[("name", &employee.full_name())],
            ),
            proceed_label: t("dialog.proceed"),
            cancel_label: t("dialog.cancel"),
        });

        let error = self
            .last_error
            .as_ref()
            .map(|error| t(error.kind.message_key()));

        UIViewModel {
            header: self.compute_header(catalog),
            body,
            pagination: self.compute_pagination(catalog),
            dialog,
            empty_state,
            error,
        }
    }

    fn compute_header(&self, catalog: &impl Translate) -> HeaderInfo {
        let views = [ViewMode::Table, ViewMode::Grid]
            .into_iter()
            .map(|mode| ViewTab {
                label: catalog.translate(self.locale, mode.label_key(), &[]),
                active: mode == self.view_mode,
            })
            .collect();

        HeaderInfo {
            title: catalog.translate(self.locale, "header.title", &[]),
            add_label: catalog.translate(self.locale, "header.addNew", &[]),
            views,
        }
    }

    fn compute_pagination(&self, catalog: &impl Translate) -> PaginationInfo {
        let total = self.total_pages();
        let page = self.current_page.to_string();
        let total_text = total.to_string();

        PaginationInfo {
            slots: pagination::page_number_display_list(self.current_page, total),
            current_page: self.current_page,
            total_pages: total,
            previous_enabled: self.current_page > 1,
            next_enabled: self.current_page < total,
            previous_label: catalog.translate(self.locale, "pagination.previous", &[]),
            next_label: catalog.translate(self.locale, "pagination.next", &[]),
            summary: catalog.translate(
                self.locale,
                "pagination.summary",
                &[("page", &page), ("total", &total_text)],
            ),
        }
    }
}

/// Display text of each field, in [`FIELD_KEYS`] order.
fn field_values(employee: &Employee) -> [String; 8] {
    [
        employee.first_name.clone(),
        employee.last_name.clone(),
        employee.date_of_employment.format(DATE_FORMAT).to_string(),
        employee.date_of_birth.format(DATE_FORMAT).to_string(),
        employee.phone.clone(),
        employee.email.clone(),
        employee.department.to_string(),
        employee.position.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pagination::PageSlot;
    use crate::domain::employee::sample_employee;
    use crate::i18n::Catalog;

    fn employees(count: u64) -> Vec<Employee> {
        (1..=count)
            .rev()
            .map(|n| {
                sample_employee(&format!("E{n}"), &format!("e{n}@company.com"))
                    .with_id(EmployeeId::new(n).unwrap())
            })
            .collect()
    }

    fn state_with(count: u64) -> AppState {
        let mut state = AppState::new(4, ViewMode::Table, Locale::En);
        state.set_employees(employees(count));
        state
    }

    #[test]
    fn five_records_split_four_and_one() {
        let mut state = state_with(5);
        assert_eq!(state.total_pages(), 2);
        assert_eq!(state.visible_employees().len(), 4);
        assert_eq!(state.visible_employees()[0].first_name, "E5");

        assert!(state.change_page(2));
        let last: Vec<_> = state.visible_employees().iter().map(|e| &e.first_name).collect();
        assert_eq!(last, vec!["E1"]);
    }

    #[test]
    fn out_of_range_pages_are_ignored() {
        let mut state = state_with(5);
        assert!(!state.change_page(0));
        assert!(!state.change_page(3));
        assert_eq!(state.current_page, 1);

        assert!(!state.previous_page());
        assert!(state.next_page());
        assert!(!state.next_page());
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn shrinking_list_clamps_current_page() {
        let mut state = state_with(9);
        assert!(state.change_page(3));

        assert!(state.set_employees(employees(5)));
        assert_eq!(state.current_page, 2);

        assert!(state.set_employees(vec![]));
        assert_eq!(state.current_page, 1);
        assert!(state.visible_employees().is_empty());
    }

    #[test]
    fn identical_reload_is_not_a_change() {
        let mut state = state_with(3);
        assert!(!state.set_employees(employees(3)));
    }

    #[test]
    fn last_delete_request_wins() {
        let mut state = state_with(3);
        let first = state.employees[0].clone();
        let second = state.employees[1].clone();

        state.request_delete(first);
        state.request_delete(second.clone());

        assert_eq!(state.take_pending_delete(), Some(second));
        assert_eq!(state.confirmation, DeleteConfirmation::Idle);
        assert_eq!(state.take_pending_delete(), None);
    }

    #[test]
    fn cancel_reports_whether_a_dialog_was_open() {
        let mut state = state_with(1);
        assert!(!state.cancel_delete());
        state.request_delete(state.employees[0].clone());
        assert!(state.cancel_delete());
        assert!(state.confirmation.pending().is_none());
    }

    #[test]
    fn empty_store_viewmodel() {
        let state = AppState::new(4, ViewMode::Table, Locale::En);
        let vm = state.compute_viewmodel(&Catalog::builtin().unwrap());

        assert_eq!(vm.empty_state.as_ref().unwrap().message, "No employees found");
        assert!(vm.body.is_empty());
        assert_eq!(vm.pagination.slots, vec![PageSlot::Page(1)]);
        assert_eq!(vm.pagination.summary, "Page 1 of 1");
        assert!(!vm.pagination.previous_enabled);
        assert!(!vm.pagination.next_enabled);
    }

    #[test]
    fn table_viewmodel_is_localized() {
        let mut state = state_with(5);
        state.locale = Locale::Tr;
        let vm = state.compute_viewmodel(&Catalog::builtin().unwrap());

        let Body::Table(table) = &vm.body else {
            panic!("expected table body");
        };
        assert_eq!(table.columns[0], "Ad");
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0].cells[2], "15/01/2020");
        assert!(vm.header.views[0].active);
        assert!(vm.pagination.next_enabled);
    }

    #[test]
    fn grid_viewmodel_has_cards_titled_by_full_name() {
        let mut state = state_with(2);
        state.view_mode = ViewMode::Grid;
        let vm = state.compute_viewmodel(&Catalog::builtin().unwrap());

        let Body::Grid(cards) = &vm.body else {
            panic!("expected grid body");
        };
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "E2 Yılmaz");
        assert_eq!(cards[0].fields.len(), 6);
        assert!(vm.header.views[1].active);
    }

    #[test]
    fn pending_delete_shows_named_dialog() {
        let mut state = state_with(1);
        state.request_delete(state.employees[0].clone());
        let vm = state.compute_viewmodel(&Catalog::builtin().unwrap());

        let dialog = vm.dialog.unwrap();
        assert_eq!(dialog.message, "Selected Employee record of E1 Yılmaz will be deleted");
        assert_eq!(dialog.proceed_label, "Proceed");
    }

    #[test]
    fn last_error_is_shown_until_cleared() {
        let mut state = state_with(1);
        state.set_error(ErrorKind::DuplicateKey, "Duplicate key for unique index: email");
        let catalog = Catalog::builtin().unwrap();

        assert_eq!(
            state.compute_viewmodel(&catalog).error.as_deref(),
            Some("An employee with this email already exists")
        );
        assert!(state.clear_error());
        assert!(state.compute_viewmodel(&catalog).error.is_none());
    }
}
