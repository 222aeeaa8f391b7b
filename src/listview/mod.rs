//! Generic searchable record list
//!
//! `RecordListView<T>` holds a read-only snapshot of records, a column schema
//! and a search term. It keeps the filtered rows as a cached list of indices
//! that is rebuilt only when the snapshot or the term changes. The cursor is
//! a position inside the filtered rows.

mod column;
pub mod filter;
pub mod format;

use std::fmt;
use std::sync::Arc;

pub use column::{Cell, CellValue, Column};

use crate::core::Action;

/// A record that can be listed and searched
pub trait Record {
    /// Unique within its collection
    fn id(&self) -> u32;

    /// Textual form of every field, matched by the free-text filter
    fn search_fields(&self) -> Vec<String>;
}

/// Row-level controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Details,
    Edit,
}

/// Why a list renders no rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// The collection itself is empty
    NoRecords,
    /// The search term filtered everything out
    NoMatches(String),
}

impl EmptyState {
    pub fn message(&self, plural: &str) -> String {
        match self {
            EmptyState::NoRecords => format!("No {plural} registered yet."),
            EmptyState::NoMatches(term) => format!("No results for \"{term}\"."),
        }
    }
}

type RowActionHandler<T> = Box<dyn Fn(RowAction, &T) -> Action>;

pub struct RecordListView<T> {
    plural: &'static str,
    records: Arc<[T]>,
    columns: Vec<Column<T>>,
    search_term: String,
    filtered: Vec<usize>,
    selected: usize,
    on_row_action: RowActionHandler<T>,
    filter_runs: u64,
    /// A refresh is in flight
    pub loading: bool,
    /// Message of the last failed refresh; rows are last-known-good
    pub load_error: Option<String>,
}

impl<T: Record> RecordListView<T> {
    pub fn new(plural: &'static str, columns: Vec<Column<T>>) -> Self {
        Self {
            plural,
            records: Arc::from(Vec::new()),
            columns,
            search_term: String::new(),
            filtered: Vec::new(),
            selected: 0,
            on_row_action: Box::new(|_, _| Action::None),
            filter_runs: 0,
            loading: false,
            load_error: None,
        }
    }

    pub fn with_records(mut self, records: impl Into<Arc<[T]>>) -> Self {
        self.set_records(records);
        self
    }

    pub fn with_row_action(mut self, handler: impl Fn(RowAction, &T) -> Action + 'static) -> Self {
        self.on_row_action = Box::new(handler);
        self
    }

    pub fn plural(&self) -> &'static str {
        self.plural
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn snapshot(&self) -> Arc<[T]> {
        Arc::clone(&self.records)
    }

    pub fn find(&self, id: u32) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Replace the snapshot. The cursor stays on the same record when it
    /// survives the swap.
    pub fn set_records(&mut self, records: impl Into<Arc<[T]>>) {
        let keep = self.selected_record().map(Record::id);
        self.records = records.into();
        self.refilter();
        if let Some(id) = keep {
            self.select_id(id);
        }
        self.loading = false;
        self.load_error = None;
    }

    // === Search ===

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: &str) {
        if self.search_term == term {
            return;
        }
        self.search_term = term.to_string();
        self.refilter();
    }

    pub fn push_char(&mut self, ch: char) {
        self.search_term.push(ch);
        self.refilter();
    }

    pub fn pop_char(&mut self) {
        if self.search_term.pop().is_some() {
            self.refilter();
        }
    }

    pub fn clear_search(&mut self) {
        self.set_search_term("");
    }

    /// How many times the filter has been evaluated
    pub fn filter_runs(&self) -> u64 {
        self.filter_runs
    }

    fn refilter(&mut self) {
        self.filtered = filter::filter_indices(&self.records, &self.search_term);
        self.filter_runs += 1;
        self.clamp_selection();
    }

    // === Filtered rows ===

    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn visible(&self) -> impl Iterator<Item = &T> + '_ {
        self.filtered.iter().filter_map(|idx| self.records.get(*idx))
    }

    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.visible().map(|record| self.cells(record)).collect()
    }

    pub fn cells(&self, record: &T) -> Vec<Cell> {
        self.columns.iter().map(|column| column.cell(record)).collect()
    }

    /// `(label, formatted value)` for every column
    pub fn describe(&self, record: &T) -> Vec<(&'static str, String)> {
        self.columns
            .iter()
            .map(|column| (column.label(), column.cell(record).text))
            .collect()
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.records.is_empty() {
            Some(EmptyState::NoRecords)
        } else if self.filtered.is_empty() {
            Some(EmptyState::NoMatches(self.search_term.clone()))
        } else {
            None
        }
    }

    // === Selection ===

    pub fn selected_index(&self) -> Option<usize> {
        if self.filtered.is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    pub fn selected_record(&self) -> Option<&T> {
        self.filtered
            .get(self.selected)
            .and_then(|idx| self.records.get(*idx))
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.filtered.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.filtered.len().saturating_sub(1);
    }

    pub fn page_up(&mut self, amount: usize) {
        self.selected = self.selected.saturating_sub(amount);
    }

    pub fn page_down(&mut self, amount: usize) {
        self.selected = (self.selected + amount).min(self.filtered.len().saturating_sub(1));
    }

    /// Move the cursor to a record if it is among the filtered rows.
    pub fn select_id(&mut self, id: u32) -> bool {
        let position = self.filtered.iter().position(|idx| {
            self.records
                .get(*idx)
                .map(|record| record.id() == id)
                .unwrap_or(false)
        });
        match position {
            Some(position) => {
                self.selected = position;
                true
            }
            None => false,
        }
    }

    fn clamp_selection(&mut self) {
        if self.filtered.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.filtered.len() {
            self.selected = self.filtered.len() - 1;
        }
    }

    // === Row actions ===

    /// Run the row-action handler on the selected record.
    pub fn trigger_row_action(&self, action: RowAction) -> Action {
        match self.selected_record() {
            Some(record) => (self.on_row_action)(action, record),
            None => Action::None,
        }
    }
}

impl<T> fmt::Debug for RecordListView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordListView")
            .field("plural", &self.plural)
            .field("records", &self.records.len())
            .field("columns", &self.columns)
            .field("search_term", &self.search_term)
            .field("filtered", &self.filtered.len())
            .field("selected", &self.selected)
            .field("loading", &self.loading)
            .field("load_error", &self.load_error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NotifyLevel;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        name: &'static str,
    }

    impl Record for Item {
        fn id(&self) -> u32 {
            self.id
        }

        fn search_fields(&self) -> Vec<String> {
            vec![self.id.to_string(), self.name.to_string()]
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item { id: 10, name: "alpha" },
            Item { id: 20, name: "beta" },
            Item { id: 30, name: "alphabet" },
        ]
    }

    fn view() -> RecordListView<Item> {
        RecordListView::new(
            "items",
            vec![Column::new("Name", 10, |item: &Item| CellValue::text(item.name))],
        )
        .with_records(items())
    }

    #[test]
    fn test_filter_is_memoized() {
        let mut view = view();
        let runs = view.filter_runs();
        view.set_search_term("");
        let _ = view.rows();
        let _ = view.empty_state();
        assert_eq!(view.filter_runs(), runs);

        view.set_search_term("alp");
        assert_eq!(view.filter_runs(), runs + 1);
        view.set_search_term("alp");
        assert_eq!(view.filter_runs(), runs + 1);
    }

    #[test]
    fn test_keystroke_editing() {
        let mut view = view();
        for ch in "bet".chars() {
            view.push_char(ch);
        }
        let names: Vec<_> = view.visible().map(|item| item.name).collect();
        assert_eq!(names, vec!["beta", "alphabet"]);

        view.pop_char();
        view.pop_char();
        assert_eq!(view.search_term(), "b");
        view.clear_search();
        assert_eq!(view.filtered_len(), 3);
    }

    #[test]
    fn test_selection_clamps_when_filter_shrinks() {
        let mut view = view();
        view.select_last();
        assert_eq!(view.selected_record().map(|i| i.id), Some(30));
        view.set_search_term("beta");
        assert_eq!(view.selected_index(), Some(0));
        assert_eq!(view.selected_record().map(|i| i.id), Some(20));
        view.set_search_term("zzz");
        assert_eq!(view.selected_index(), None);
        assert!(view.selected_record().is_none());
    }

    #[test]
    fn test_set_records_keeps_cursor_on_same_id() {
        let mut view = view();
        view.select_id(20);
        let mut reordered = items();
        reordered.reverse();
        view.set_records(reordered);
        assert_eq!(view.selected_record().map(|i| i.id), Some(20));
        assert_eq!(view.selected_index(), Some(1));
    }

    #[test]
    fn test_empty_states() {
        let mut empty: RecordListView<Item> = RecordListView::new("items", Vec::new());
        assert_eq!(empty.empty_state(), Some(EmptyState::NoRecords));
        empty.set_search_term("x");
        assert_eq!(empty.empty_state(), Some(EmptyState::NoRecords));

        let mut view = view();
        assert_eq!(view.empty_state(), None);
        view.set_search_term("omega");
        assert_eq!(
            view.empty_state(),
            Some(EmptyState::NoMatches("omega".to_string()))
        );
        assert_eq!(
            EmptyState::NoMatches("omega".to_string()).message("items"),
            "No results for \"omega\"."
        );
        assert_eq!(EmptyState::NoRecords.message("items"), "No items registered yet.");
    }

    #[test]
    fn test_default_row_action_is_noop() {
        let view = view();
        assert_eq!(view.trigger_row_action(RowAction::Edit), Action::None);
    }

    #[test]
    fn test_row_action_receives_selected_record() {
        let mut view = view().with_row_action(|action, item: &Item| {
            Action::Notify(format!("{action:?} {}", item.name), NotifyLevel::Info)
        });
        view.select_next();
        assert_eq!(
            view.trigger_row_action(RowAction::Details),
            Action::Notify("Details beta".to_string(), NotifyLevel::Info)
        );
        view.set_search_term("nothing");
        assert_eq!(view.trigger_row_action(RowAction::Details), Action::None);
    }

    #[test]
    fn test_paging() {
        let mut view = view();
        view.page_down(10);
        assert_eq!(view.selected_index(), Some(2));
        view.page_up(1);
        assert_eq!(view.selected_index(), Some(1));
        view.page_up(10);
        assert_eq!(view.selected_index(), Some(0));
    }
}
