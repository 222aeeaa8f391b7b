//! Client-side routes of the dashboard

use crate::domain::RecordKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    Vehicles,
    Drivers,
    Trips,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Dashboard, Route::Vehicles, Route::Drivers, Route::Trips];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Vehicles => "/veiculos",
            Route::Drivers => "/motoristas",
            Route::Trips => "/viagens",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Vehicles => "Vehicles",
            Route::Drivers => "Drivers",
            Route::Trips => "Trips",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Route::Dashboard => '1',
            Route::Vehicles => '2',
            Route::Drivers => '3',
            Route::Trips => '4',
        }
    }

    /// Record collection shown on this route, if any
    pub fn kind(&self) -> Option<RecordKind> {
        match self {
            Route::Dashboard => None,
            Route::Vehicles => Some(RecordKind::Vehicles),
            Route::Drivers => Some(RecordKind::Drivers),
            Route::Trips => Some(RecordKind::Trips),
        }
    }

    pub fn from_shortcut(ch: char) -> Option<Self> {
        Route::ALL.into_iter().find(|route| route.shortcut() == ch)
    }

    /// Match a path exactly, ignoring case, surrounding whitespace and a
    /// trailing slash. The leading slash is optional.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        match trimmed.to_lowercase().as_str() {
            "" => Some(Route::Dashboard),
            "veiculos" => Some(Route::Vehicles),
            "motoristas" => Some(Route::Drivers),
            "viagens" => Some(Route::Trips),
            _ => None,
        }
    }

    /// Resolve a path, redirecting unmatched paths to the dashboard.
    pub fn from_path(path: &str) -> Self {
        Self::parse(path).unwrap_or(Route::Dashboard)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
