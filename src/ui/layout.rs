use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const SIDEBAR_WIDTH: u16 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    /// Absent while the sidebar is collapsed
    pub sidebar: Option<Rect>,
    pub content: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

pub fn areas(size: Rect, sidebar_open: bool) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    let (sidebar, content) = if sidebar_open {
        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(vertical[1]);
        (Some(main[0]), main[1])
    } else {
        (None, vertical[1])
    };

    UiAreas {
        size,
        header: vertical[0],
        sidebar,
        content,
        status_line: vertical[2],
        command_line: vertical[3],
    }
}

/// Rows of the table body inside `content`: borders, search bar and header
/// row excluded.
pub fn table_body_height(content: Rect) -> usize {
    content.height.saturating_sub(5) as usize
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_open() {
        let areas = areas(Rect::new(0, 0, 120, 40), true);
        let sidebar = areas.sidebar.unwrap();
        assert_eq!(sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(areas.content.x, SIDEBAR_WIDTH);
        assert_eq!(areas.content.width, 120 - SIDEBAR_WIDTH);
        assert_eq!(areas.header.height, 3);
        assert_eq!(areas.command_line.y, 39);
    }

    #[test]
    fn test_sidebar_collapsed() {
        let areas = areas(Rect::new(0, 0, 80, 24), false);
        assert!(areas.sidebar.is_none());
        assert_eq!(areas.content.width, 80);
        assert_eq!(areas.content.height, 24 - 5);
    }
}
