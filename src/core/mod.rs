pub mod action;
pub mod command;
pub mod prefs;
pub mod route;

pub use action::{Action, ExportFormat, NavigateTarget, NotifyLevel};
pub use command::{parse_command, Command};
pub use prefs::{Theme, UiPrefs};
pub use route::Route;
