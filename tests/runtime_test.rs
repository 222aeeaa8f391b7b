//! Refresh pipeline: bridge, worker and stale-result handling

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;

use agencia::app::{App, StatusLevel};
use agencia::core::UiPrefs;
use agencia::data::{Dataset, RecordSource, Snapshot, SourceError, StaticSource};
use agencia::domain::RecordKind;
use agencia::runtime::{RuntimeBridge, RuntimeEvent};

struct OfflineSource;

#[async_trait]
impl RecordSource for OfflineSource {
    async fn fetch(&self, _kind: RecordKind) -> Result<Snapshot, SourceError> {
        Err(SourceError::Unavailable("offline".to_string()))
    }

    fn describe(&self) -> String {
        "offline".to_string()
    }
}

fn wait_for_events(bridge: &RuntimeBridge, count: usize, timeout: Duration) -> Vec<RuntimeEvent> {
    let deadline = Instant::now() + timeout;
    let mut events = Vec::new();
    while events.len() < count && Instant::now() < deadline {
        events.extend(bridge.poll_events());
        thread::sleep(Duration::from_millis(5));
    }
    events
}

fn app() -> App {
    App::new(
        Dataset::builtin().unwrap(),
        UiPrefs::default(),
        NaiveDate::from_ymd_opt(2024, 3, 25).unwrap(),
    )
}

#[test]
fn test_fetch_round_trip() {
    let source = StaticSource::new(Dataset::builtin().unwrap());
    let bridge = RuntimeBridge::new(Arc::new(source)).unwrap();
    bridge.fetch(1, RecordKind::Drivers).unwrap();

    let events = wait_for_events(&bridge, 1, Duration::from_secs(5));
    assert_eq!(events.len(), 1);
    match &events[0] {
        RuntimeEvent::Loaded { seq, snapshot } => {
            assert_eq!(*seq, 1);
            assert_eq!(snapshot.kind(), RecordKind::Drivers);
            assert_eq!(snapshot.len(), 3);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_superseded_fetch_is_aborted() {
    let source = StaticSource::new(Dataset::builtin().unwrap())
        .with_latency(Duration::from_millis(300));
    let bridge = RuntimeBridge::new(Arc::new(source)).unwrap();
    bridge.fetch(1, RecordKind::Trips).unwrap();
    bridge.fetch(2, RecordKind::Trips).unwrap();

    let mut events = wait_for_events(&bridge, 1, Duration::from_secs(5));
    thread::sleep(Duration::from_millis(500));
    events.extend(bridge.poll_events());

    let seqs: Vec<u64> = events.iter().map(RuntimeEvent::seq).collect();
    assert_eq!(seqs, vec![2]);
}

#[test]
fn test_kinds_do_not_abort_each_other() {
    let source = StaticSource::new(Dataset::builtin().unwrap())
        .with_latency(Duration::from_millis(50));
    let bridge = RuntimeBridge::new(Arc::new(source)).unwrap();
    bridge.fetch(1, RecordKind::Vehicles).unwrap();
    bridge.fetch(1, RecordKind::Drivers).unwrap();

    let events = wait_for_events(&bridge, 2, Duration::from_secs(5));
    let mut kinds: Vec<RecordKind> = events.iter().map(RuntimeEvent::kind).collect();
    kinds.sort();
    assert_eq!(kinds, vec![RecordKind::Vehicles, RecordKind::Drivers]);
}

#[test]
fn test_failure_is_reported_as_event() {
    let bridge = RuntimeBridge::new(Arc::new(OfflineSource)).unwrap();
    bridge.fetch(7, RecordKind::Vehicles).unwrap();

    let events = wait_for_events(&bridge, 1, Duration::from_secs(5));
    match &events[..] {
        [RuntimeEvent::Failed { seq, kind, message }] => {
            assert_eq!(*seq, 7);
            assert_eq!(*kind, RecordKind::Vehicles);
            assert!(message.contains("offline"));
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn test_app_applies_only_latest_result() {
    let mut app = app();
    let source = StaticSource::new(Dataset::builtin().unwrap());
    let bridge = RuntimeBridge::new(Arc::new(source)).unwrap();

    app.request_all();
    let requests = app.take_fetch_requests();
    assert_eq!(requests.len(), 3);
    for (seq, kind) in requests {
        bridge.fetch(seq, kind).unwrap();
    }

    for event in wait_for_events(&bridge, 3, Duration::from_secs(5)) {
        app.apply_runtime_event(event);
    }
    assert!(!app.vehicles.loading);
    assert!(!app.drivers.loading);
    assert!(!app.trips.loading);
    assert_eq!(app.trips.records().len(), 6);

    // A late event carrying an old sequence number changes nothing.
    app.apply_runtime_event(RuntimeEvent::Loaded {
        seq: 0,
        snapshot: Snapshot::Trips(Vec::new()),
    });
    assert_eq!(app.trips.records().len(), 6);
}

#[test]
fn test_app_keeps_rows_when_refresh_fails() {
    let mut app = app();
    let bridge = RuntimeBridge::new(Arc::new(OfflineSource)).unwrap();

    let seq = app.request_fetch(RecordKind::Vehicles);
    bridge.fetch(seq, RecordKind::Vehicles).unwrap();
    for event in wait_for_events(&bridge, 1, Duration::from_secs(5)) {
        app.apply_runtime_event(event);
    }

    assert_eq!(app.vehicles.records().len(), 3);
    assert!(!app.vehicles.loading);
    assert!(app.vehicles.load_error.is_some());
    assert_eq!(app.status_text().map(|(_, level)| level), Some(StatusLevel::Error));
}
