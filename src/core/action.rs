//! Actions that views and commands return to communicate with the app

use crate::domain::RecordKind;

use super::prefs::Theme;
use super::route::Route;

/// Actions returned by list views, row handlers and commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action needed
    None,

    /// Navigate to a route or record
    Navigate(NavigateTarget),

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Re-fetch a collection from the record source
    Refresh(RecordKind),

    /// Export the current filtered list
    Export(ExportFormat),

    /// Set or toggle (None) the theme
    SetTheme(Option<Theme>),

    /// Toggle the navigation sidebar
    ToggleSidebar,

    /// Open the help popup
    Help,

    /// Request quit
    Quit,
}

/// Navigation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateTarget {
    /// Close the detail popup
    Back,
    /// Switch to a route
    Route(Route),
    /// Open the detail popup for a record
    Detail { kind: RecordKind, id: u32 },
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}
