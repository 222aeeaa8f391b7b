use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::core::{parse_command, Action, Command, NavigateTarget, NotifyLevel, Route, UiPrefs};
use crate::data::{Dataset, Snapshot};
use crate::domain::{Driver, RecordKind, Trip, Vehicle};
use crate::listview::{RecordListView, RowAction};
use crate::modules::dashboard::DashboardStats;
use crate::pages::{self, ListPage};
use crate::runtime::{FetchTracker, RuntimeEvent};

const STATUS_TTL: Duration = Duration::from_secs(3);
const CHORD_TTL: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Keystrokes edit the active page's search term
    Search,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

impl From<NotifyLevel> for StatusLevel {
    fn from(level: NotifyLevel) -> Self {
        match level {
            NotifyLevel::Info => StatusLevel::Info,
            NotifyLevel::Warn => StatusLevel::Warn,
            NotifyLevel::Error => StatusLevel::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

#[derive(Debug, Clone)]
pub struct PendingChord {
    pub key: char,
    pub since: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct CommandState {
    pub input: String,
    pub last: Option<String>,
}

/// Fields of one record, shown in a popup over its page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPopup {
    pub kind: RecordKind,
    pub id: u32,
    pub fields: Vec<(&'static str, String)>,
}

impl DetailPopup {
    pub fn title(&self) -> String {
        format!("{} #{}", capitalize(self.kind.noun()), self.id)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct App {
    pub route: Route,
    pub prefs: UiPrefs,
    pub input_mode: InputMode,
    pub command: CommandState,
    pub vehicles: RecordListView<Vehicle>,
    pub drivers: RecordListView<Driver>,
    pub trips: RecordListView<Trip>,
    pub stats: DashboardStats,
    pub today: NaiveDate,
    pub detail: Option<DetailPopup>,
    pub status: Option<StatusMessage>,
    pub pending_chord: Option<PendingChord>,
    pub help_open: bool,
    pub should_quit: bool,
    pub export_dir: PathBuf,
    fetches: FetchTracker,
    pending_fetches: Vec<(u64, RecordKind)>,
}

impl App {
    pub fn new(dataset: Dataset, prefs: UiPrefs, today: NaiveDate) -> Self {
        let mut app = Self {
            route: Route::Dashboard,
            prefs,
            input_mode: InputMode::Normal,
            command: CommandState::default(),
            vehicles: pages::vehicles_view().with_records(dataset.vehicles),
            drivers: pages::drivers_view(today).with_records(dataset.drivers),
            trips: pages::trips_view().with_records(dataset.trips),
            stats: DashboardStats::default(),
            today,
            detail: None,
            status: None,
            pending_chord: None,
            help_open: false,
            should_quit: false,
            export_dir: crate::config::export_dir(),
            fetches: FetchTracker::new(),
            pending_fetches: Vec::new(),
        };
        app.refresh_stats();
        app
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    // === Pages ===

    /// Record kind listed on the current route
    pub fn active_kind(&self) -> Option<RecordKind> {
        self.route.kind()
    }

    pub fn page(&self, kind: RecordKind) -> &dyn ListPage {
        match kind {
            RecordKind::Vehicles => &self.vehicles,
            RecordKind::Drivers => &self.drivers,
            RecordKind::Trips => &self.trips,
        }
    }

    pub fn page_mut(&mut self, kind: RecordKind) -> &mut dyn ListPage {
        match kind {
            RecordKind::Vehicles => &mut self.vehicles,
            RecordKind::Drivers => &mut self.drivers,
            RecordKind::Trips => &mut self.trips,
        }
    }

    pub fn active_page(&self) -> Option<&dyn ListPage> {
        self.active_kind().map(|kind| self.page(kind))
    }

    pub fn active_page_mut(&mut self) -> Option<&mut dyn ListPage> {
        match self.active_kind() {
            Some(kind) => Some(self.page_mut(kind)),
            None => None,
        }
    }

    pub fn refresh_stats(&mut self) {
        self.stats = DashboardStats::compute(
            self.vehicles.records(),
            self.drivers.records(),
            self.trips.records(),
            self.today,
        );
    }

    // === Navigation ===

    pub fn navigate(&mut self, route: Route) {
        if self.route != route {
            tracing::debug!(from = %self.route, to = %route, "navigate");
        }
        self.route = route;
        self.detail = None;
        if self.input_mode == InputMode::Search {
            self.input_mode = InputMode::Normal;
        }
    }

    /// Navigate by path; unknown paths land on the dashboard.
    pub fn navigate_path(&mut self, path: &str) {
        let route = Route::from_path(path);
        if Route::parse(path).is_none() {
            self.set_status(format!("No page at {path}, showing dashboard"), StatusLevel::Warn);
        }
        self.navigate(route);
    }

    // === Status ===

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        self.clear_expired_chord();
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }

    // === Chords ===

    pub fn set_chord(&mut self, key: char) {
        self.pending_chord = Some(PendingChord {
            key,
            since: Instant::now(),
        });
    }

    /// True if `key` completes the pending chord
    pub fn consume_chord(&mut self, key: char) -> bool {
        let Some(chord) = self.pending_chord.take() else {
            return false;
        };
        chord.key == key && chord.since.elapsed() <= CHORD_TTL
    }

    pub fn clear_chord(&mut self) {
        self.pending_chord = None;
    }

    fn clear_expired_chord(&mut self) {
        if let Some(chord) = self.pending_chord.as_ref() {
            if chord.since.elapsed() > CHORD_TTL {
                self.pending_chord = None;
            }
        }
    }

    // === Search ===

    pub fn enter_search(&mut self) {
        if self.active_kind().is_some() {
            self.input_mode = InputMode::Search;
        } else {
            self.set_status("Search is available on record pages", StatusLevel::Warn);
        }
    }

    /// Leave search mode. The term stays applied.
    pub fn exit_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn search_push(&mut self, ch: char) {
        if let Some(page) = self.active_page_mut() {
            page.push_char(ch);
        }
    }

    pub fn search_pop(&mut self) {
        if let Some(page) = self.active_page_mut() {
            page.pop_char();
        }
    }

    pub fn clear_search(&mut self) {
        if let Some(page) = self.active_page_mut() {
            page.set_search_term("");
        }
    }

    // === Command line ===

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.command.input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = self.command.input.trim().to_string();
        if input.is_empty() {
            self.exit_command();
            return;
        }
        let cmd = parse_command(&input);
        self.exit_command();
        let action = self.execute_command(&cmd);
        self.apply_action(action);
        self.command.last = Some(input);
    }

    /// Execute a parsed command
    pub fn execute_command(&mut self, cmd: &Command) -> Action {
        match cmd {
            Command::Go(route) => Action::Navigate(NavigateTarget::Route(*route)),
            Command::Redirect(path) => {
                self.navigate_path(path);
                Action::None
            }
            Command::Find(term) => match self.active_page_mut() {
                Some(page) => {
                    page.set_search_term(term);
                    Action::None
                }
                None => Action::Notify(
                    "Search is available on record pages".to_string(),
                    NotifyLevel::Warn,
                ),
            },
            Command::Refresh => match self.active_kind() {
                Some(kind) => Action::Refresh(kind),
                None => {
                    self.request_all();
                    Action::Notify("Refreshing all records".to_string(), NotifyLevel::Info)
                }
            },
            Command::Export(format) => Action::Export(*format),
            Command::Theme(theme) => Action::SetTheme(*theme),
            Command::Sidebar => Action::ToggleSidebar,
            Command::Help => Action::Help,
            Command::Quit => Action::Quit,
            Command::Unknown(input) => {
                Action::Notify(format!("Unknown command: {input}"), NotifyLevel::Warn)
            }
        }
    }

    /// Apply an action returned by a command or a row handler
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(NavigateTarget::Back) => self.detail = None,
            Action::Navigate(NavigateTarget::Route(route)) => self.navigate(route),
            Action::Navigate(NavigateTarget::Detail { kind, id }) => self.open_detail(kind, id),
            Action::Notify(message, level) => self.set_status(message, level.into()),
            Action::Refresh(kind) => {
                self.request_fetch(kind);
                self.set_status(format!("Refreshing {}", kind.slug()), StatusLevel::Info);
            }
            Action::Export(format) => self.export(format),
            Action::SetTheme(theme) => {
                match theme {
                    Some(theme) => self.prefs.theme = theme,
                    None => self.prefs.toggle_theme(),
                }
                self.set_status(format!("Theme: {}", self.prefs.theme.as_str()), StatusLevel::Info);
            }
            Action::ToggleSidebar => self.prefs.toggle_sidebar(),
            Action::Help => self.help_open = true,
            Action::Quit => self.should_quit = true,
        }
    }

    // === Rows ===

    pub fn row_action(&mut self, action: RowAction) {
        let Some(page) = self.active_page() else {
            return;
        };
        let action = page.trigger_row_action(action);
        self.apply_action(action);
    }

    fn open_detail(&mut self, kind: RecordKind, id: u32) {
        match self.page(kind).describe_id(id) {
            Some(fields) => self.detail = Some(DetailPopup { kind, id, fields }),
            None => {
                tracing::warn!(?kind, id, "record vanished from snapshot");
                self.detail = None;
                self.set_status(
                    format!("{} #{id} no longer exists, refreshing", capitalize(kind.noun())),
                    StatusLevel::Warn,
                );
                self.request_fetch(kind);
            }
        }
    }

    /// Selected row of the active page as tab-separated text
    pub fn selected_row_text(&self) -> Option<String> {
        self.active_page().and_then(|page| page.selected_tsv())
    }

    fn export(&mut self, format: crate::core::ExportFormat) {
        let Some(kind) = self.active_kind() else {
            self.set_status("Nothing to export on the dashboard", StatusLevel::Warn);
            return;
        };
        match self.page(kind).export(&self.export_dir, kind, format) {
            Ok(exported) => self.set_status(
                format!("Exported {} {} to {}", exported.count, kind.slug(), exported.path.display()),
                StatusLevel::Info,
            ),
            Err(err) => {
                tracing::error!(?kind, error = %format!("{err:#}"), "export failed");
                self.set_status(format!("Export failed: {err:#}"), StatusLevel::Error);
            }
        }
    }

    // === Refresh ===

    /// Queue a fetch of `kind`. Any older in-flight fetch becomes stale.
    pub fn request_fetch(&mut self, kind: RecordKind) -> u64 {
        let seq = self.fetches.request(kind);
        self.page_mut(kind).set_loading(true);
        self.pending_fetches.push((seq, kind));
        seq
    }

    pub fn request_all(&mut self) {
        for kind in RecordKind::ALL {
            self.request_fetch(kind);
        }
    }

    pub fn take_fetch_requests(&mut self) -> Vec<(u64, RecordKind)> {
        std::mem::take(&mut self.pending_fetches)
    }

    /// Apply a worker event. Events for superseded requests are dropped.
    pub fn apply_runtime_event(&mut self, event: RuntimeEvent) {
        let kind = event.kind();
        let seq = event.seq();
        if !self.fetches.accept(kind, seq) {
            tracing::debug!(?kind, seq, "discarded stale fetch result");
            return;
        }

        match event {
            RuntimeEvent::Loaded { snapshot, .. } => {
                match snapshot {
                    Snapshot::Vehicles(records) => self.vehicles.set_records(records),
                    Snapshot::Drivers(records) => self.drivers.set_records(records),
                    Snapshot::Trips(records) => self.trips.set_records(records),
                }
                self.refresh_stats();
                self.refresh_detail(kind);
                tracing::info!(?kind, seq, records = self.page(kind).total_len(), "snapshot applied");
            }
            RuntimeEvent::Failed { message, .. } => {
                let page = self.page_mut(kind);
                page.set_loading(false);
                page.set_load_error(Some(message.clone()));
                self.set_status(
                    format!("Failed to load {}: {message}", kind.slug()),
                    StatusLevel::Error,
                );
            }
        }
    }

    fn refresh_detail(&mut self, kind: RecordKind) {
        let Some((detail_kind, id)) = self.detail.as_ref().map(|d| (d.kind, d.id)) else {
            return;
        };
        if detail_kind != kind {
            return;
        }
        match self.page(kind).describe_id(id) {
            Some(fields) => self.detail = Some(DetailPopup { kind, id, fields }),
            None => self.detail = None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Theme;

    fn app() -> App {
        App::new(
            Dataset::builtin().unwrap(),
            UiPrefs::default(),
            NaiveDate::from_ymd_opt(2024, 3, 25).unwrap(),
        )
    }

    #[test]
    fn test_new_computes_stats() {
        let app = app();
        assert_eq!(app.route, Route::Dashboard);
        assert_eq!(app.stats.vehicles_total, 3);
        assert_eq!(app.stats.trips_in_progress, 1);
    }

    #[test]
    fn test_search_only_on_record_pages() {
        let mut app = app();
        app.enter_search();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.status.is_some());

        app.navigate(Route::Vehicles);
        app.enter_search();
        assert_eq!(app.input_mode, InputMode::Search);
        for ch in "def".chars() {
            app.search_push(ch);
        }
        assert_eq!(app.vehicles.filtered_len(), 1);
        app.exit_search();
        assert_eq!(app.vehicles.search_term(), "def");
    }

    #[test]
    fn test_search_terms_are_per_page() {
        let mut app = app();
        app.navigate(Route::Drivers);
        app.execute_command(&Command::Find("maria".to_string()));
        app.navigate(Route::Trips);
        assert_eq!(app.trips.search_term(), "");
        assert_eq!(app.drivers.search_term(), "maria");
    }

    #[test]
    fn test_command_line() {
        let mut app = app();
        app.enter_command();
        app.command.input = "go /viagens".to_string();
        app.apply_command();
        assert_eq!(app.route, Route::Trips);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.command.last.as_deref(), Some("go /viagens"));

        app.command.input = "theme dark".to_string();
        app.apply_command();
        assert_eq!(app.prefs.theme, Theme::Dark);
    }

    #[test]
    fn test_unknown_path_redirects_to_dashboard() {
        let mut app = app();
        app.navigate(Route::Trips);
        app.navigate_path("/relatorios");
        assert_eq!(app.route, Route::Dashboard);
        assert_eq!(app.status_text().map(|(_, level)| level), Some(StatusLevel::Warn));
    }

    #[test]
    fn test_details_popup() {
        let mut app = app();
        app.navigate(Route::Vehicles);
        app.row_action(RowAction::Details);
        let detail = app.detail.clone().unwrap();
        assert_eq!(detail.title(), "Vehicle #1");
        assert_eq!(detail.fields[0], ("Plate", "ABC1234".to_string()));
        app.apply_action(Action::Navigate(NavigateTarget::Back));
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_missing_record_warns_and_refreshes() {
        let mut app = app();
        app.apply_action(Action::Navigate(NavigateTarget::Detail {
            kind: RecordKind::Trips,
            id: 404,
        }));
        assert!(app.detail.is_none());
        assert_eq!(app.status_text().map(|(_, level)| level), Some(StatusLevel::Warn));
        let requests = app.take_fetch_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1, RecordKind::Trips);
        assert!(app.trips.loading);
    }

    #[test]
    fn test_edit_is_refused() {
        let mut app = app();
        app.navigate(Route::Drivers);
        app.row_action(RowAction::Edit);
        assert_eq!(app.status_text().map(|(_, level)| level), Some(StatusLevel::Warn));
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut app = app();
        let stale = app.request_fetch(RecordKind::Vehicles);
        let fresh = app.request_fetch(RecordKind::Vehicles);

        let newer = app.vehicles.records()[..1].to_vec();
        app.apply_runtime_event(RuntimeEvent::Loaded {
            seq: fresh,
            snapshot: Snapshot::Vehicles(newer),
        });
        app.apply_runtime_event(RuntimeEvent::Loaded {
            seq: stale,
            snapshot: Snapshot::Vehicles(Vec::new()),
        });
        assert_eq!(app.vehicles.records().len(), 1);
        assert_eq!(app.stats.vehicles_total, 1);
        assert!(!app.vehicles.loading);
    }

    #[test]
    fn test_failure_keeps_last_known_good() {
        let mut app = app();
        let seq = app.request_fetch(RecordKind::Trips);
        app.apply_runtime_event(RuntimeEvent::Failed {
            seq,
            kind: RecordKind::Trips,
            message: "source unavailable: offline".to_string(),
        });
        assert_eq!(app.trips.records().len(), 6);
        assert!(!app.trips.loading);
        assert_eq!(app.trips.load_error.as_deref(), Some("source unavailable: offline"));
        assert_eq!(app.status_text().map(|(_, level)| level), Some(StatusLevel::Error));
    }

    #[test]
    fn test_chord() {
        let mut app = app();
        app.set_chord('g');
        assert!(app.consume_chord('g'));
        assert!(!app.consume_chord('g'));
        app.set_chord('g');
        assert!(!app.consume_chord('x'));
    }

    #[test]
    fn test_export_needs_a_record_page() {
        let mut app = app();
        app.apply_action(Action::Export(crate::core::ExportFormat::Csv));
        assert_eq!(app.status_text().map(|(_, level)| level), Some(StatusLevel::Warn));
    }
}
