//! CSV and JSON export of the filtered record lists

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;

use agencia::app::{App, StatusLevel};
use agencia::core::{Action, ExportFormat, Route, UiPrefs};
use agencia::data::Dataset;
use agencia::domain::{RecordKind, Trip};
use agencia::modules::export::export_view;
use agencia::pages::{trips_view, vehicles_view};

fn temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("agencia-{name}-{}-{nanos}", std::process::id()))
}

#[test]
fn test_csv_has_labels_and_formatted_cells() {
    let dir = temp_dir("csv");
    let dataset = Dataset::builtin().unwrap();
    let mut view = trips_view().with_records(dataset.trips);
    view.set_search_term("são paulo");

    let exported = export_view(&dir, RecordKind::Trips, ExportFormat::Csv, &view).unwrap();
    assert_eq!(exported.count, 1);
    let name = exported.path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("trips-"));
    assert!(name.ends_with(".csv"));

    let content = fs::read_to_string(&exported.path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("Route,Start,End,Driver,Vehicle,Client,Amount,Status")
    );
    let row = lines.next().unwrap();
    assert!(row.contains("\"R$ 2.500,00\""));
    assert!(row.contains("Scheduled"));
    assert_eq!(lines.next(), None);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_json_holds_raw_records() {
    let dir = temp_dir("json");
    let dataset = Dataset::builtin().unwrap();
    let mut view = trips_view().with_records(dataset.trips);
    view.set_search_term("completed");

    let exported = export_view(&dir, RecordKind::Trips, ExportFormat::Json, &view).unwrap();
    assert_eq!(exported.count, 3);

    let content = fs::read_to_string(&exported.path).unwrap();
    let trips: Vec<Trip> = serde_json::from_str(&content).unwrap();
    let ids: Vec<u32> = trips.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 4, 5]);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_empty_list_is_not_exported() {
    let dir = temp_dir("empty");
    let dataset = Dataset::builtin().unwrap();
    let mut view = vehicles_view().with_records(dataset.vehicles);
    view.set_search_term("viagem");

    let err = export_view(&dir, RecordKind::Vehicles, ExportFormat::Csv, &view).unwrap_err();
    assert!(err.to_string().contains("no vehicles"));
    assert!(!dir.exists());
}

#[test]
fn test_app_export_reports_path() {
    let dir = temp_dir("app");
    let mut app = App::new(
        Dataset::builtin().unwrap(),
        UiPrefs::default(),
        NaiveDate::from_ymd_opt(2024, 3, 25).unwrap(),
    )
    .with_export_dir(dir.clone());

    app.navigate(Route::Vehicles);
    app.apply_action(Action::Export(ExportFormat::Csv));

    let (text, level) = app.status_text().unwrap();
    assert_eq!(level, StatusLevel::Info);
    assert!(text.starts_with("Exported 3 vehicles"));
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_back_to_back_exports_keep_both_files() {
    let dir = temp_dir("twice");
    let dataset = Dataset::builtin().unwrap();
    let view = vehicles_view().with_records(dataset.vehicles);

    let first = export_view(&dir, RecordKind::Vehicles, ExportFormat::Csv, &view).unwrap();
    let second = export_view(&dir, RecordKind::Vehicles, ExportFormat::Csv, &view).unwrap();
    assert_ne!(first.path, second.path);
    assert!(first.path.exists());
    assert!(second.path.exists());
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 2);

    fs::remove_dir_all(&dir).unwrap();
}
