//! Command parser for the : command system

use super::action::ExportFormat;
use super::prefs::Theme;
use super::route::Route;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation
    Go(Route),
    /// A path that did not match any route; navigation redirects to `/`
    Redirect(String),

    // Current list
    Find(String),
    Refresh,
    Export(ExportFormat),

    // Preferences
    Theme(Option<Theme>),
    Sidebar,

    Help,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    if input.starts_with('/') {
        return go(input);
    }

    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.to_lowercase().as_str() {
        // Navigation
        "go" | "open" => match args {
            Some(path) => go(&path),
            None => Command::Unknown(input.to_string()),
        },
        "dashboard" | "home" => Command::Go(Route::Dashboard),
        "vehicles" | "veiculos" | "veh" => Command::Go(Route::Vehicles),
        "drivers" | "motoristas" | "drv" => Command::Go(Route::Drivers),
        "trips" | "viagens" => Command::Go(Route::Trips),

        // Current list
        "find" | "search" => Command::Find(args.unwrap_or_default()),
        "refresh" | "reload" => Command::Refresh,
        "export" => match args.as_deref().map(str::to_lowercase).as_deref() {
            None | Some("csv") => Command::Export(ExportFormat::Csv),
            Some("json") => Command::Export(ExportFormat::Json),
            _ => Command::Unknown(input.to_string()),
        },

        // Preferences
        "theme" => match args {
            None => Command::Theme(None),
            Some(value) if value.eq_ignore_ascii_case("toggle") => Command::Theme(None),
            Some(value) => match value.parse() {
                Ok(theme) => Command::Theme(Some(theme)),
                Err(_) => Command::Unknown(input.to_string()),
            },
        },
        "sidebar" | "nav" => Command::Sidebar,

        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,

        _ => Command::Unknown(input.to_string()),
    }
}

fn go(path: &str) -> Command {
    match Route::parse(path) {
        Some(route) => Command::Go(route),
        None => Command::Redirect(path.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!(parse_command("vehicles"), Command::Go(Route::Vehicles));
        assert_eq!(parse_command("motoristas"), Command::Go(Route::Drivers));
        assert_eq!(parse_command("go /viagens"), Command::Go(Route::Trips));
        assert_eq!(parse_command("/veiculos"), Command::Go(Route::Vehicles));
        assert_eq!(parse_command("home"), Command::Go(Route::Dashboard));
    }

    #[test]
    fn test_parse_unmatched_path_redirects() {
        assert_eq!(
            parse_command("go /clientes"),
            Command::Redirect("/clientes".to_string())
        );
        assert_eq!(
            parse_command("/nowhere"),
            Command::Redirect("/nowhere".to_string())
        );
    }

    #[test]
    fn test_parse_list_commands() {
        assert_eq!(parse_command("find abc"), Command::Find("abc".to_string()));
        assert_eq!(parse_command("find"), Command::Find(String::new()));
        assert_eq!(parse_command("export"), Command::Export(ExportFormat::Csv));
        assert_eq!(
            parse_command("export JSON"),
            Command::Export(ExportFormat::Json)
        );
        assert_eq!(parse_command("reload"), Command::Refresh);
    }

    #[test]
    fn test_parse_preference_commands() {
        assert_eq!(parse_command("theme"), Command::Theme(None));
        assert_eq!(parse_command("theme toggle"), Command::Theme(None));
        assert_eq!(parse_command("theme dark"), Command::Theme(Some(Theme::Dark)));
        assert_eq!(parse_command("sidebar"), Command::Sidebar);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("notacommand"),
            Command::Unknown("notacommand".to_string())
        );
        assert_eq!(
            parse_command("export xml"),
            Command::Unknown("export xml".to_string())
        );
        assert_eq!(
            parse_command("theme sepia"),
            Command::Unknown("theme sepia".to_string())
        );
    }
}
