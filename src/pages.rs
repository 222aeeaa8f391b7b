//! Column schemas and row handlers for the three record pages
//!
//! Each page is a `RecordListView` configured with the columns below. The
//! views share every behavior; only the schema differs.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::{Action, ExportFormat, NavigateTarget, NotifyLevel};
use crate::domain::{Driver, RecordKind, Trip, Vehicle};
use crate::listview::format::{format_brl, format_date, format_datetime};
use crate::listview::{Cell, CellValue, Column, EmptyState, Record, RecordListView, RowAction};
use crate::modules::export::{self, Exported};

fn money(value: &CellValue) -> String {
    match value.inner() {
        CellValue::Money(amount) => format_brl(*amount),
        other => other.to_string(),
    }
}

fn date(value: &CellValue) -> String {
    match value.inner() {
        CellValue::Date(date) => format_date(*date),
        CellValue::DateTime(at) => format_datetime(*at),
        other => other.to_string(),
    }
}

fn seats(value: &CellValue) -> String {
    format!("{value} seats")
}

pub fn vehicle_columns() -> Vec<Column<Vehicle>> {
    vec![
        Column::new("Plate", 10, |v: &Vehicle| CellValue::text(&v.plate)),
        Column::new("Model", 16, |v: &Vehicle| CellValue::text(&v.model)),
        Column::new("Brand", 16, |v: &Vehicle| CellValue::text(&v.brand)),
        Column::new("Year", 6, |v: &Vehicle| CellValue::Integer(v.year.into())),
        Column::new("Type", 14, |v: &Vehicle| CellValue::text(&v.kind)),
        Column::new("Capacity", 10, |v: &Vehicle| {
            CellValue::Integer(v.capacity.into())
        })
        .with_formatter(seats),
        Column::new("Status", 12, |v: &Vehicle| CellValue::status(v.status)),
    ]
}

/// Licenses that expired before `today` are flagged.
pub fn driver_columns(today: NaiveDate) -> Vec<Column<Driver>> {
    vec![
        Column::new("Name", 18, |d: &Driver| CellValue::text(&d.name)),
        Column::new("CPF", 16, |d: &Driver| CellValue::text(&d.national_id)),
        Column::new("CNH", 13, |d: &Driver| CellValue::text(&d.license_number)),
        Column::new("Cat.", 5, |d: &Driver| {
            CellValue::text(d.license_category.as_str())
        }),
        Column::new("Expires", 11, move |d: &Driver| {
            CellValue::Date(d.license_expiry).flagged(d.license_expired(today))
        })
        .with_formatter(date),
        Column::new("Status", 12, |d: &Driver| CellValue::status(d.status)),
    ]
}

pub fn trip_columns() -> Vec<Column<Trip>> {
    vec![
        Column::new("Route", 30, |t: &Trip| CellValue::text(t.route_label())),
        Column::new("Start", 17, |t: &Trip| CellValue::DateTime(t.start_time)).with_formatter(date),
        Column::new("End", 17, |t: &Trip| CellValue::DateTime(t.end_time)).with_formatter(date),
        Column::new("Driver", 16, |t: &Trip| CellValue::text(&t.driver)),
        Column::new("Vehicle", 10, |t: &Trip| CellValue::text(&t.vehicle)),
        Column::new("Client", 16, |t: &Trip| CellValue::text(&t.client)),
        Column::new("Amount", 14, |t: &Trip| CellValue::Money(t.amount)).with_formatter(money),
        Column::new("Status", 12, |t: &Trip| CellValue::status(t.status)),
    ]
}

/// Details opens the record popup. Edit is refused: records are read-only.
pub fn row_handler<T: Record + 'static>(
    kind: RecordKind,
) -> impl Fn(RowAction, &T) -> Action + 'static {
    move |action: RowAction, record: &T| match action {
        RowAction::Details => Action::Navigate(NavigateTarget::Detail {
            kind,
            id: record.id(),
        }),
        RowAction::Edit => Action::Notify(
            format!("Cannot edit {} #{}: records are read-only", kind.noun(), record.id()),
            NotifyLevel::Warn,
        ),
    }
}

pub fn vehicles_view() -> RecordListView<Vehicle> {
    RecordListView::new("vehicles", vehicle_columns())
        .with_row_action(row_handler(RecordKind::Vehicles))
}

pub fn drivers_view(today: NaiveDate) -> RecordListView<Driver> {
    RecordListView::new("drivers", driver_columns(today))
        .with_row_action(row_handler(RecordKind::Drivers))
}

pub fn trips_view() -> RecordListView<Trip> {
    RecordListView::new("trips", trip_columns()).with_row_action(row_handler(RecordKind::Trips))
}

/// A record page with its record type erased, so the app and the renderer
/// can drive whichever page is active.
pub trait ListPage {
    fn plural(&self) -> &'static str;
    fn total_len(&self) -> usize;
    fn filtered_len(&self) -> usize;

    fn search_term(&self) -> &str;
    fn set_search_term(&mut self, term: &str);
    fn push_char(&mut self, ch: char);
    fn pop_char(&mut self);

    fn selected_index(&self) -> Option<usize>;
    fn select_next(&mut self);
    fn select_prev(&mut self);
    fn select_first(&mut self);
    fn select_last(&mut self);
    fn page_up(&mut self, amount: usize);
    fn page_down(&mut self, amount: usize);

    /// `(label, width)` per column
    fn header(&self) -> Vec<(&'static str, u16)>;
    fn rows(&self) -> Vec<Vec<Cell>>;
    fn empty_state(&self) -> Option<EmptyState>;
    fn trigger_row_action(&self, action: RowAction) -> Action;

    /// Formatted fields of the record with `id`, if it is in the snapshot
    fn describe_id(&self, id: u32) -> Option<Vec<(&'static str, String)>>;
    /// The selected row as tab-separated values
    fn selected_tsv(&self) -> Option<String>;

    fn is_loading(&self) -> bool;
    fn set_loading(&mut self, loading: bool);
    fn load_error(&self) -> Option<&str>;
    fn set_load_error(&mut self, error: Option<String>);

    fn export(&self, dir: &Path, kind: RecordKind, format: ExportFormat) -> anyhow::Result<Exported>;
}

impl<T: Record + Serialize> ListPage for RecordListView<T> {
    fn plural(&self) -> &'static str {
        RecordListView::plural(self)
    }

    fn total_len(&self) -> usize {
        self.records().len()
    }

    fn filtered_len(&self) -> usize {
        RecordListView::filtered_len(self)
    }

    fn search_term(&self) -> &str {
        RecordListView::search_term(self)
    }

    fn set_search_term(&mut self, term: &str) {
        RecordListView::set_search_term(self, term)
    }

    fn push_char(&mut self, ch: char) {
        RecordListView::push_char(self, ch)
    }

    fn pop_char(&mut self) {
        RecordListView::pop_char(self)
    }

    fn selected_index(&self) -> Option<usize> {
        RecordListView::selected_index(self)
    }

    fn select_next(&mut self) {
        RecordListView::select_next(self)
    }

    fn select_prev(&mut self) {
        RecordListView::select_prev(self)
    }

    fn select_first(&mut self) {
        RecordListView::select_first(self)
    }

    fn select_last(&mut self) {
        RecordListView::select_last(self)
    }

    fn page_up(&mut self, amount: usize) {
        RecordListView::page_up(self, amount)
    }

    fn page_down(&mut self, amount: usize) {
        RecordListView::page_down(self, amount)
    }

    fn header(&self) -> Vec<(&'static str, u16)> {
        self.columns()
            .iter()
            .map(|column| (column.label(), column.width()))
            .collect()
    }

    fn rows(&self) -> Vec<Vec<Cell>> {
        RecordListView::rows(self)
    }

    fn empty_state(&self) -> Option<EmptyState> {
        RecordListView::empty_state(self)
    }

    fn trigger_row_action(&self, action: RowAction) -> Action {
        RecordListView::trigger_row_action(self, action)
    }

    fn describe_id(&self, id: u32) -> Option<Vec<(&'static str, String)>> {
        self.find(id).map(|record| self.describe(record))
    }

    fn selected_tsv(&self) -> Option<String> {
        self.selected_record().map(|record| {
            self.cells(record)
                .into_iter()
                .map(|cell| cell.text)
                .collect::<Vec<_>>()
                .join("\t")
        })
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    fn set_load_error(&mut self, error: Option<String>) {
        self.load_error = error;
    }

    fn export(&self, dir: &Path, kind: RecordKind, format: ExportFormat) -> anyhow::Result<Exported> {
        export::export_view(dir, kind, format, self)
    }
}
