//! Process-wide UI preferences

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "light" | "claro" => Ok(Theme::Light),
            "dark" | "escuro" => Ok(Theme::Dark),
            other => Err(format!("unknown theme {other:?} (expected light or dark)")),
        }
    }
}

impl TryFrom<String> for Theme {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Terminals narrower than this start with the sidebar collapsed.
pub const NARROW_WIDTH: u16 = 100;

/// Theme and sidebar state shared by every view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiPrefs {
    pub theme: Theme,
    pub sidebar_open: bool,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            sidebar_open: true,
        }
    }
}

impl UiPrefs {
    /// Build the initial preferences. Explicit settings win; otherwise the
    /// sidebar follows the terminal width.
    pub fn initial(theme: Option<Theme>, sidebar: Option<bool>, terminal_width: u16) -> Self {
        Self {
            theme: theme.unwrap_or_default(),
            sidebar_open: sidebar.unwrap_or(terminal_width >= NARROW_WIDTH),
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }
}
