use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use agencia::app::{App, InputMode, StatusLevel};
use agencia::config::{self, Config};
use agencia::core::{Action, ExportFormat, Route, Theme, UiPrefs};
use agencia::data::{Dataset, RecordSource, SeedFileSource, StaticSource};
use agencia::domain::RecordKind;
use agencia::listview::RowAction;
use agencia::runtime::RuntimeBridge;
use agencia::{logging, ui};

#[derive(Debug, Parser)]
#[command(
    name = "agencia",
    version,
    about = "Agência: travel agency fleet, drivers and trips in the terminal"
)]
struct Args {
    /// Config file (default: $AGENCIA_CONFIG or ~/.config/agencia/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// TOML seed file with vehicles, drivers and trips
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Start page (/, /veiculos, /motoristas, /viagens)
    #[arg(long)]
    route: Option<String>,

    /// light or dark
    #[arg(long)]
    theme: Option<Theme>,

    /// error, warn, info, debug or trace
    #[arg(long)]
    log_level: Option<String>,

    /// Validate the dataset, print its counts and exit
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let (config, config_source) = config::load(args.config.as_deref())?;

    init_logging(&args, &config);
    tracing::info!(
        config = %config_source
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "defaults".to_string()),
        "starting agencia"
    );

    let seed = args.seed.clone().or_else(|| config.data.seed.clone());
    let dataset = match seed.as_deref() {
        Some(path) => Dataset::load(path)
            .with_context(|| format!("invalid seed file {}", path.display()))?,
        None => Dataset::builtin().context("invalid built-in dataset")?,
    };
    dataset.log_summary();

    if args.check {
        for kind in RecordKind::ALL {
            println!("{:<10} {}", kind.slug(), dataset.len(kind));
        }
        for dangling in dataset.dangling_references() {
            println!("warning: {dangling}");
        }
        return Ok(());
    }

    let source: Arc<dyn RecordSource> = match seed {
        Some(path) => Arc::new(SeedFileSource::new(path)),
        None => Arc::new(
            StaticSource::new(dataset.clone())
                .with_latency(Duration::from_millis(config.data.latency_ms)),
        ),
    };
    tracing::info!(source = %source.describe(), "record source ready");

    let width = crossterm::terminal::size().map(|(w, _)| w).unwrap_or(0);
    let prefs = UiPrefs::initial(args.theme.or(config.ui.theme), config.ui.sidebar, width);
    let today = chrono::Local::now().date_naive();

    let mut app = App::new(dataset, prefs, today);
    if let Some(path) = args.route.as_deref() {
        app.navigate_path(path);
    }

    let runtime = RuntimeBridge::new(source)?;

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn init_logging(args: &Args, config: &Config) {
    let level = args.log_level.as_deref().unwrap_or(&config.log.level);
    let level = match logging::parse_level(level) {
        Ok(level) => level,
        Err(err) => {
            eprintln!("warning: {err}; logging at info");
            tracing::Level::INFO
        }
    };
    let Some(path) = config.log.file.clone().or_else(config::log_path) else {
        eprintln!("warning: no data directory, logging disabled");
        return;
    };
    if let Err(err) = logging::init(&path, level) {
        eprintln!("warning: {err:#}; logging disabled");
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => handle_key(&mut app, key),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    for event in runtime.poll_events() {
        app.apply_runtime_event(event);
    }
    for (seq, kind) in app.take_fetch_requests() {
        if let Err(err) = runtime.fetch(seq, kind) {
            tracing::error!(?kind, error = %err, "runtime unavailable");
            app.page_mut(kind).set_loading(false);
            app.set_status("Background runtime stopped", StatusLevel::Error);
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.help_open = false;
        }
        return;
    }

    if app.detail.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            app.detail = None;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Search => handle_search_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    if key.code != KeyCode::Char('g') {
        app.clear_chord();
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => app.should_quit = true,
        (KeyCode::Char('?'), _) => app.help_open = true,
        (KeyCode::Char('/'), _) => app.enter_search(),
        (KeyCode::Char(':'), _) => app.enter_command(),
        (KeyCode::Char('r'), _) => refresh(app),
        (KeyCode::Char('t'), _) => app.apply_action(Action::SetTheme(None)),
        (KeyCode::Char('b'), _) => app.apply_action(Action::ToggleSidebar),
        (KeyCode::Char('x'), _) => app.apply_action(Action::Export(ExportFormat::Csv)),
        (KeyCode::Char('X'), _) => app.apply_action(Action::Export(ExportFormat::Json)),
        (KeyCode::Char('y'), _) => handle_copy_to_clipboard(app),
        (KeyCode::Char('e'), _) => app.row_action(RowAction::Edit),
        (KeyCode::Enter, _) => app.row_action(RowAction::Details),
        (KeyCode::Esc, _) => app.clear_search(),
        (KeyCode::Char('g'), _) => {
            if app.consume_chord('g') {
                with_page(app, |page| page.select_first());
            } else {
                app.set_chord('g');
            }
        }
        (KeyCode::Char('G'), _) => with_page(app, |page| page.select_last()),
        (KeyCode::Char('u'), mods) if mods.contains(KeyModifiers::CONTROL) => {
            let amount = page_amount(app, true);
            with_page(app, |page| page.page_up(amount));
        }
        (KeyCode::Char('d'), mods) if mods.contains(KeyModifiers::CONTROL) => {
            let amount = page_amount(app, true);
            with_page(app, |page| page.page_down(amount));
        }
        (KeyCode::PageUp, _) => {
            let amount = page_amount(app, false);
            with_page(app, |page| page.page_up(amount));
        }
        (KeyCode::PageDown, _) => {
            let amount = page_amount(app, false);
            with_page(app, |page| page.page_down(amount));
        }
        (KeyCode::Up | KeyCode::Char('k'), _) => with_page(app, |page| page.select_prev()),
        (KeyCode::Down | KeyCode::Char('j'), _) => with_page(app, |page| page.select_next()),
        (KeyCode::Char(ch), _) => {
            if let Some(route) = Route::from_shortcut(ch) {
                app.navigate(route);
            }
        }
        _ => {}
    }
}

fn handle_search_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.clear_search();
            app.exit_search();
        }
        KeyCode::Enter => app.exit_search(),
        KeyCode::Backspace => app.search_pop(),
        KeyCode::Up => with_page(app, |page| page.select_prev()),
        KeyCode::Down => with_page(app, |page| page.select_next()),
        KeyCode::Char(ch) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                app.search_push(ch);
            }
        }
        _ => {}
    }
}

fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_command(),
        KeyCode::Enter => app.apply_command(),
        KeyCode::Backspace => {
            app.command.input.pop();
        }
        KeyCode::Up => {
            if let Some(last) = app.command.last.clone() {
                app.command.input = last;
            }
        }
        KeyCode::Char(ch) => app.command.input.push(ch),
        _ => {}
    }
}

fn refresh(app: &mut App) {
    match app.active_kind() {
        Some(kind) => app.apply_action(Action::Refresh(kind)),
        None => {
            app.request_all();
            app.set_status("Refreshing all records", StatusLevel::Info);
        }
    }
}

fn with_page(app: &mut App, f: impl FnOnce(&mut dyn agencia::pages::ListPage)) {
    if let Some(page) = app.active_page_mut() {
        f(page);
    }
}

fn terminal_rect() -> Option<Rect> {
    let (width, height) = crossterm::terminal::size().ok()?;
    Some(Rect {
        x: 0,
        y: 0,
        width,
        height,
    })
}

fn page_amount(app: &App, half: bool) -> usize {
    let Some(size) = terminal_rect() else {
        return 5;
    };
    let areas = ui::layout::areas(size, app.prefs.sidebar_open);
    let height = ui::layout::table_body_height(areas.content).max(1);
    if half {
        (height / 2).max(1)
    } else {
        height
    }
}

fn handle_copy_to_clipboard(app: &mut App) {
    use arboard::Clipboard;

    let Some(text) = app.selected_row_text() else {
        app.set_status("Nothing to copy", StatusLevel::Warn);
        return;
    };

    match Clipboard::new() {
        Ok(mut clipboard) => {
            if clipboard.set_text(&text).is_ok() {
                let preview: String = text.chars().take(24).collect();
                let preview = if preview.len() < text.len() {
                    format!("{}...", preview.replace('\t', " "))
                } else {
                    preview.replace('\t', " ")
                };
                app.set_status(format!("Copied: {preview}"), StatusLevel::Info);
            } else {
                app.set_status("Failed to copy to clipboard", StatusLevel::Error);
            }
        }
        Err(_) => {
            app.set_status("Clipboard not available", StatusLevel::Error);
        }
    }
}
