use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Cell as TableCell, Clear, Gauge, List, ListItem, Paragraph, Row, Table,
    TableState, Wrap,
};
use ratatui::Frame;

pub mod layout;
pub mod theme;
pub mod widgets;

use crate::app::{App, DetailPopup, InputMode, StatusLevel};
use crate::core::Route;
use crate::domain::RecordKind;
use crate::listview::format::{format_brl, format_delta};
use crate::listview::Cell;
use crate::pages::ListPage;

use self::theme::Palette;
use self::widgets::sparkline::{sparkline_text, MonthBars};

pub fn draw(f: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.prefs.theme);
    let areas = layout::areas(f.size(), app.prefs.sidebar_open);

    f.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        areas.size,
    );

    draw_header(f, areas.header, app, &palette);
    if let Some(sidebar) = areas.sidebar {
        draw_sidebar(f, sidebar, app, &palette);
    }
    match app.active_kind() {
        Some(kind) => draw_page(f, areas.content, app, kind, &palette),
        None => draw_dashboard(f, areas.content, app, &palette),
    }
    draw_status_line(f, areas.status_line, app, &palette);
    draw_command_line(f, areas.command_line, app, &palette);

    if let Some(detail) = app.detail.as_ref() {
        draw_detail_popup(f, areas.size, detail, &palette);
    }
    if app.help_open {
        draw_help_popup(f, areas.size, &palette);
    }
}

fn panel<'a>(title: impl Into<Line<'a>>, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(title)
}

fn draw_header(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let title = Line::from(vec![
        Span::styled(
            "Agência",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(app.route.title(), Style::default().fg(palette.fg)),
        Span::styled(format!("  {}", app.route.path()), Style::default().fg(palette.muted)),
    ]);
    let left = Paragraph::new(title)
        .block(panel("", palette))
        .alignment(Alignment::Left);

    let right_line = Line::from(vec![
        Span::styled("Theme ", Style::default().fg(palette.muted)),
        Span::raw(format!("{}  ", app.prefs.theme.as_str())),
        Span::styled("Today ", Style::default().fg(palette.muted)),
        Span::raw(app.today.format("%d/%m/%Y").to_string()),
    ]);
    let right = Paragraph::new(right_line)
        .block(panel("", palette))
        .alignment(Alignment::Left);

    f.render_widget(left, chunks[0]);
    f.render_widget(right, chunks[1]);
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let items: Vec<ListItem> = Route::ALL
        .iter()
        .map(|route| {
            let is_active = *route == app.route;
            let marker = if is_active { "▌" } else { " " };
            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(palette.accent)),
                Span::styled(
                    format!("{} ", route.shortcut()),
                    Style::default().fg(palette.muted),
                ),
                Span::raw(route.title()),
            ]);
            let style = if is_active {
                Style::default()
                    .fg(palette.selection_fg)
                    .bg(palette.selection_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.fg)
            };
            ListItem::new(line).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(panel("Menu", palette)), area);
}

// === Dashboard ===

fn draw_dashboard(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);

    let stats = &app.stats;
    draw_stat_card(
        f,
        cards[0],
        "Trips in progress",
        stats.trips_in_progress.to_string(),
        Line::from(Span::styled(
            format!("{} trips in total", app.trips.records().len()),
            Style::default().fg(palette.muted),
        )),
        palette,
    );
    draw_stat_card(
        f,
        cards[1],
        "Available vehicles",
        stats.vehicles_available.to_string(),
        Line::from(Span::styled(
            format!("of {} in the fleet", stats.vehicles_total),
            Style::default().fg(palette.muted),
        )),
        palette,
    );
    let expired = if stats.expired_licenses == 0 {
        Span::styled("all licenses valid", Style::default().fg(palette.muted))
    } else {
        Span::styled(
            format!("{} expired licenses", stats.expired_licenses),
            Style::default().fg(palette.red),
        )
    };
    draw_stat_card(
        f,
        cards[2],
        "Drivers on trip",
        format!("{}/{}", stats.drivers_on_trip, stats.drivers_total),
        Line::from(expired),
        palette,
    );
    let (revenue, delta) = match stats.revenue.as_ref() {
        Some(revenue) => {
            let delta = match revenue.delta {
                Some(delta) => {
                    let color = if delta < 0.0 { palette.red } else { palette.green };
                    Span::styled(
                        format!("{} vs previous month", format_delta(delta)),
                        Style::default().fg(color),
                    )
                }
                None => Span::styled("no revenue last month", Style::default().fg(palette.muted)),
            };
            (format_brl(revenue.amount), Line::from(delta))
        }
        None => ("--".to_string(), Line::from("")),
    };
    let revenue_title = stats
        .revenue
        .as_ref()
        .map(|revenue| format!("Revenue {}", revenue.month.label()))
        .unwrap_or_else(|| "Monthly revenue".to_string());
    draw_stat_card(f, cards[3], &revenue_title, revenue, delta, palette);

    let labels: Vec<String> = stats
        .trips_per_month
        .iter()
        .map(|(month, _)| month.label())
        .collect();
    let values = stats.series_values();
    let chart = panel(format!("Trips per month {}", sparkline_text(&values)), palette);
    let inner = chart.inner(rows[1]);
    f.render_widget(chart, rows[1]);
    if values.is_empty() {
        f.render_widget(
            Paragraph::new("No trips registered yet.").style(Style::default().fg(palette.muted)),
            inner,
        );
    } else {
        f.render_widget(
            MonthBars::new(&values)
                .labels(&labels)
                .bar_width(7)
                .style(Style::default().fg(palette.accent))
                .label_style(Style::default().fg(palette.muted)),
            inner,
        );
    }

    let ratio = stats.availability_ratio();
    let gauge = Gauge::default()
        .block(panel("Fleet availability", palette))
        .gauge_style(Style::default().fg(palette.green).bg(palette.border))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!(
            "{}/{} available ({:.0}%)",
            stats.vehicles_available,
            stats.vehicles_total,
            ratio * 100.0
        ));
    f.render_widget(gauge, rows[2]);
}

fn draw_stat_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    footer: Line<'_>,
    palette: &Palette,
) {
    let lines = vec![
        Line::from(Span::styled(
            value,
            Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
        )),
        footer,
    ];
    let card = Paragraph::new(Text::from(lines)).block(panel(
        Span::styled(title.to_string(), Style::default().fg(palette.muted)),
        palette,
    ));
    f.render_widget(card, area);
}

// === Record pages ===

fn draw_page(f: &mut Frame, area: Rect, app: &App, kind: RecordKind, palette: &Palette) {
    let page = app.page(kind);
    let banner = banner_line(page, palette);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(u16::from(banner.is_some())),
            Constraint::Min(0),
        ])
        .split(area);

    draw_search_bar(f, chunks[0], app, page, palette);
    if let Some(banner) = banner {
        f.render_widget(Paragraph::new(banner), chunks[1]);
    }

    let title = format!(
        "{} ({} of {})",
        kind.title(),
        page.filtered_len(),
        page.total_len()
    );
    match page.empty_state() {
        Some(empty) => {
            let message = Paragraph::new(Text::from(vec![
                Line::from(""),
                Line::from(Span::styled(
                    empty.message(page.plural()),
                    Style::default().fg(palette.muted),
                )),
            ]))
            .alignment(Alignment::Center)
            .block(panel(title, palette));
            f.render_widget(message, chunks[2]);
        }
        None => draw_table(f, chunks[2], page, title, palette),
    }
}

fn banner_line(page: &dyn ListPage, palette: &Palette) -> Option<Line<'static>> {
    if let Some(error) = page.load_error() {
        return Some(Line::from(vec![
            Span::styled(
                " ! ",
                Style::default().fg(palette.badge_fg).bg(palette.red),
            ),
            Span::styled(format!(" {error}  "), Style::default().fg(palette.red)),
            Span::styled("r", Style::default().fg(palette.accent)),
            Span::styled(" retry", Style::default().fg(palette.muted)),
        ]));
    }
    if page.is_loading() {
        return Some(Line::from(Span::styled(
            format!("Loading {}…", page.plural()),
            Style::default().fg(palette.muted),
        )));
    }
    None
}

fn draw_search_bar(f: &mut Frame, area: Rect, app: &App, page: &dyn ListPage, palette: &Palette) {
    let editing = app.input_mode == InputMode::Search;
    let term = page.search_term();
    let mut spans = vec![Span::styled(
        "Search ",
        Style::default().fg(if editing { palette.accent } else { palette.muted }),
    )];
    if term.is_empty() && !editing {
        spans.push(Span::styled(
            "press / to filter",
            Style::default().fg(palette.muted),
        ));
    } else {
        spans.push(Span::raw(term.to_string()));
    }
    if editing {
        spans.push(Span::styled("▏", Style::default().fg(palette.accent)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn table_cell(cell: Cell, palette: &Palette) -> TableCell<'static> {
    if let Some(badge) = cell.badge {
        let color = palette.badge(badge);
        return TableCell::from(Line::from(Span::styled(
            format!(" {} ", cell.text),
            Style::default()
                .fg(palette.badge_fg)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )));
    }
    if cell.flagged {
        return TableCell::from(Span::styled(
            format!("{} !", cell.text),
            Style::default().fg(palette.red).add_modifier(Modifier::BOLD),
        ));
    }
    TableCell::from(cell.text)
}

fn draw_table(f: &mut Frame, area: Rect, page: &dyn ListPage, title: String, palette: &Palette) {
    let columns = page.header();
    let header = Row::new(
        columns
            .iter()
            .map(|(label, _)| TableCell::from(*label))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().fg(palette.muted).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = page
        .rows()
        .into_iter()
        .map(|cells| Row::new(cells.into_iter().map(|cell| table_cell(cell, palette))))
        .collect();
    let widths: Vec<Constraint> = columns
        .iter()
        .map(|(_, width)| Constraint::Length(*width))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(title, palette))
        .column_spacing(1)
        .highlight_style(
            Style::default()
                .fg(palette.selection_fg)
                .bg(palette.selection_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(page.selected_index());
    f.render_stateful_widget(table, area, &mut state);
}

// === Footer ===

fn draw_status_line(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let mut spans = vec![
        Span::styled("Page ", Style::default().fg(palette.muted)),
        Span::raw(format!("{}  ", app.route.title())),
    ];
    if let Some(page) = app.active_page() {
        spans.push(Span::styled("Rows ", Style::default().fg(palette.muted)));
        spans.push(Span::raw(format!(
            "{}/{}  ",
            page.filtered_len(),
            page.total_len()
        )));
        if !page.search_term().is_empty() {
            spans.push(Span::styled("Filter ", Style::default().fg(palette.muted)));
            spans.push(Span::raw(format!("\"{}\"  ", page.search_term())));
        }
    }
    let loading = RecordKind::ALL
        .iter()
        .filter(|kind| app.page(**kind).is_loading())
        .count();
    if loading > 0 {
        spans.push(Span::styled(
            format!("loading {loading}"),
            Style::default().fg(palette.amber),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Get command hint for autocompletion
fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("go", "Navigate by path (/, /veiculos, /motoristas, /viagens)"),
        ("dashboard", "Open the dashboard"),
        ("vehicles", "Open vehicles"),
        ("drivers", "Open drivers"),
        ("trips", "Open trips"),
        ("find", "Set the search term"),
        ("refresh", "Reload records"),
        ("export", "Export the filtered list (csv|json)"),
        ("theme", "Switch theme (light|dark|toggle)"),
        ("sidebar", "Toggle the sidebar"),
        ("help", "Show key bindings"),
        ("quit", "Quit"),
    ];

    commands
        .into_iter()
        .find(|(cmd, _)| cmd.starts_with(&input))
        .map(|(_, desc)| desc)
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint = command_hint(&app.command.input).unwrap_or("go /path | find text | export csv");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(palette.amber)),
                Span::raw(app.command.input.as_str()),
                Span::styled(format!("  {hint}"), Style::default().fg(palette.muted)),
            ])
        }
        InputMode::Search => Line::from(vec![
            Span::styled("/ ", Style::default().fg(palette.accent)),
            Span::styled(
                "type to filter  Enter keep  Esc clear",
                Style::default().fg(palette.muted),
            ),
        ]),
        InputMode::Normal => match app.status_text() {
            Some((text, level)) => {
                let color = match level {
                    StatusLevel::Info => palette.green,
                    StatusLevel::Warn => palette.amber,
                    StatusLevel::Error => palette.red,
                };
                Line::from(vec![
                    Span::styled("msg: ", Style::default().fg(palette.muted)),
                    Span::styled(text.to_string(), Style::default().fg(color)),
                ])
            }
            None => action_hints(app, palette),
        },
    };

    f.render_widget(Paragraph::new(content), area);
}

fn action_hints(app: &App, palette: &Palette) -> Line<'static> {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(palette.accent));
    let mut spans = vec![key("1-4"), Span::raw(" Pages  ")];
    if app.active_kind().is_some() {
        spans.extend([
            key("/"),
            Span::raw(" Search  "),
            key("Enter"),
            Span::raw(" Details  "),
            key("x"),
            Span::raw(" Export  "),
            key("y"),
            Span::raw(" Copy  "),
        ]);
    }
    spans.extend([
        key("r"),
        Span::raw(" Refresh  "),
        key("t"),
        Span::raw(" Theme  "),
        key("b"),
        Span::raw(" Sidebar  "),
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit"),
    ]);
    Line::from(spans)
}

// === Popups ===

fn draw_detail_popup(f: &mut Frame, area: Rect, detail: &DetailPopup, palette: &Palette) {
    let popup_area = layout::centered_rect(60, 60, area);
    f.render_widget(Clear, popup_area);

    let label_width = detail
        .fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let mut lines: Vec<Line> = detail
        .fields
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{label:<label_width$}  "),
                    Style::default().fg(palette.muted),
                ),
                Span::raw(value.clone()),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc close",
        Style::default().fg(palette.muted),
    )));

    let paragraph = Paragraph::new(Text::from(lines))
        .style(Style::default().bg(palette.bg).fg(palette.fg))
        .block(panel(detail.title(), palette))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect, palette: &Palette) {
    let popup_area = layout::centered_rect(64, 70, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  1-4        Dashboard / Vehicles / Drivers / Trips"),
        Line::from("  j / k      Move selection"),
        Line::from("  gg / G     Top / bottom"),
        Line::from("  Ctrl-u/d   Half page up/down"),
        Line::from("  Enter      Record details"),
        Line::from("  Esc        Close / clear search"),
        Line::from(""),
        Line::from("Actions"),
        Line::from("  /          Search the current list"),
        Line::from("  :          Command line (go /viagens, export json, ...)"),
        Line::from("  e          Edit record"),
        Line::from("  r          Refresh"),
        Line::from("  x / X      Export CSV / JSON"),
        Line::from("  y          Copy row"),
        Line::from("  t          Toggle theme"),
        Line::from("  b          Toggle sidebar"),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .style(Style::default().bg(palette.bg).fg(palette.fg))
        .block(panel("Help", palette))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_hint() {
        assert_eq!(command_hint("exp"), Some("Export the filtered list (csv|json)"));
        assert_eq!(command_hint(""), None);
        assert_eq!(command_hint("zzz"), None);
    }
}
